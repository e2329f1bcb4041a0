//! Desktop front end for the silence-based audio splitter.
//!
//! The window hosts a single form (file path, segment duration, silence
//! threshold); submitting it runs the whole pipeline from
//! `audiosplit-core`. All user-facing outcomes are modal dialogs.

mod commands;

use log::info;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Setup logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("audiosplit {}", audiosplit_core::VERSION);

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            commands::pick_input_file,
            commands::split_media,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
