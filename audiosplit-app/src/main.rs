#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    audiosplit_app_lib::run()
}
