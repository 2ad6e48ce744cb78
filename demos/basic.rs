//! Standalone demo: opens a window with the bloom picker.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_blossom::{blossom_picker, PickerOptions, PickerValue};

fn main() {
    env_logger::init();

    let value = RwSignal::new(PickerValue::default());
    let hex = RwSignal::new(String::from("#e05299"));

    floem::Application::new()
        .window(
            move |_| {
                let picker = blossom_picker(value, PickerOptions::default())
                    .viewport(|| (420.0, 420.0))
                    .on_change(move |c| hex.set(c.hex.clone()))
                    .on_collapse(|c| log::info!("collapsed at {}", c.hsla));

                v_stack((picker, label(move || hex.get())))
                    .style(|s| s.size_full().items_center().justify_center().gap(12.0))
                    .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                        floem::quit_app()
                    })
            },
            Some(
                WindowConfig::default()
                    .size((420.0, 420.0))
                    .title("floem-blossom"),
            ),
        )
        .run();
}
