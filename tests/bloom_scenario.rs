use std::cell::RefCell;
use std::rc::Rc;

use floem_blossom::{
    hsl_to_hex, organize_colors_into_layers, BlossomPicker, ColorInput, OptionsPatch, PetalLayer,
    PetalRef, PickerColor, PickerOptions, Point,
};

type Log = Rc<RefCell<Vec<PickerColor>>>;

fn picker_with_logs(options: PickerOptions) -> (BlossomPicker, Log, Log) {
    let changes: Log = Rc::default();
    let collapses: Log = Rc::default();
    let (c, k) = (changes.clone(), collapses.clone());
    let picker = BlossomPicker::new(options)
        .on_change(move |color| c.borrow_mut().push(color.clone()))
        .on_collapse(move |color| k.borrow_mut().push(color.clone()));
    (picker, changes, collapses)
}

#[test]
fn pick_inner_petal_then_click_outside() {
    let (mut picker, changes, collapses) = picker_with_logs(PickerOptions {
        colors: Vec::new(),
        core_size: 32.0,
        petal_size: 32.0,
        ..Default::default()
    });
    assert_eq!(picker.layout().layers.len(), 2);

    picker.expand();
    let swatch = picker.layout().layers[0][2];
    let (x, y) = picker.layout().petal_offset(0, 2).unwrap();
    let target = picker.petal_at(Point::new(x, y)).unwrap();
    assert_eq!(target, PetalRef { layer: 0, index: 2 });
    picker.click_petal(target);

    {
        let changes = changes.borrow();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].value.layer, PetalLayer::Inner);
        assert_eq!(changes[0].hex, hsl_to_hex(swatch.h, swatch.s, swatch.l));
    }

    let outside = Point::new(picker.layout().container_size, 0.0);
    assert!(!picker.contains(outside));
    picker.pointer_down_outside();
    picker.pointer_down_outside();

    let collapses = collapses.borrow();
    assert_eq!(collapses.len(), 1);
    assert_eq!(collapses[0].value.hue, swatch.h);
    assert_eq!(collapses[0].hex, changes.borrow()[0].hex);
    assert!(!picker.active_listeners().any());
}

#[test]
fn teardown_releases_everything() {
    let (mut picker, changes, collapses) = picker_with_logs(PickerOptions {
        open_on_hover: true,
        ..Default::default()
    });
    picker.pointer_entered().unwrap();
    picker.expand();
    picker.pointer_left().unwrap();

    picker.destroy();
    picker.destroy();

    assert!(!picker.active_listeners().any());
    assert!(picker.pending_timers().is_empty());
    assert!(picker.frame().is_none());

    picker.click_petal(PetalRef { layer: 0, index: 0 });
    picker.collapse();
    assert!(changes.borrow().is_empty());
    assert!(collapses.borrow().is_empty());
}

#[test]
fn custom_palette_rebuilds_layout() {
    let colors: Vec<ColorInput> = (0..30)
        .map(|i| ColorInput::from(format!("hsl({}, 70%, {}%)", i * 12, 30 + i * 2)))
        .collect();
    let (mut picker, _, _) = picker_with_logs(PickerOptions::default());
    assert_eq!(picker.layout().layers.len(), 2);

    picker.update_options(OptionsPatch {
        colors: Some(colors.clone()),
        ..Default::default()
    });
    assert_eq!(picker.structure_revision(), 1);
    assert_eq!(picker.layout().layers.len(), 3);

    let parsed: Vec<_> = colors.iter().map(floem_blossom::parse_color).collect();
    assert_eq!(organize_colors_into_layers(&parsed), picker.layout().layers);
}

#[test]
fn options_load_from_json() {
    let options: PickerOptions = serde_json::from_str(
        r##"{
            "colors": ["#ff0000", "rgb(0, 128, 255)", {"h": 120, "s": 50, "l": 50}],
            "showAlphaSlider": false,
            "openOnHover": true
        }"##,
    )
    .unwrap();
    let mut picker = BlossomPicker::new(options);
    assert!(picker.layout().layers.iter().map(Vec::len).sum::<usize>() == 3);
    picker.expand();
    let frame = picker.frame().unwrap();
    assert!(frame.slider.is_none());
    assert!(frame.expanded);
}
