//! Tauri commands wired to the split pipeline

use audiosplit_core::{pipeline, SplitError, SplitRequest};
use log::{error, info};
use serde::Serialize;
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

/// Outcome payload returned to the frontend on success
#[derive(Debug, Clone, Serialize)]
pub struct SplitSummary {
    /// Directory the segments were written to
    pub output_dir: String,
    /// Number of segments written
    pub segment_count: usize,
}

/// Open the file chooser and return the selected path, if any
#[tauri::command]
pub async fn pick_input_file(app: tauri::AppHandle) -> Option<String> {
    app.dialog()
        .file()
        .add_filter("All files", &["*"])
        .add_filter("Audio files", &["mp3", "wav"])
        .add_filter("Video files", &["mp4", "mkv", "avi"])
        .blocking_pick_file()
        .map(|p| p.to_string())
}

/// Run one split request built from the raw form fields.
///
/// Every outcome is also surfaced as a modal dialog; the returned `Result`
/// lets the frontend reset its state.
#[tauri::command]
pub async fn split_media(
    app: tauri::AppHandle,
    file_path: String,
    duration: String,
    silence_threshold: String,
) -> Result<SplitSummary, String> {
    let request = match SplitRequest::parse(&file_path, &duration, &silence_threshold) {
        Ok(request) => request,
        Err(e) => {
            show_error(&app, &e);
            return Err(e.to_string());
        }
    };

    match pipeline::run(&request) {
        Ok(outcome) => {
            let summary = SplitSummary {
                output_dir: outcome.output_dir.display().to_string(),
                segment_count: outcome.segment_count(),
            };

            info!(
                "split finished, {} segment(s) in {}",
                summary.segment_count, summary.output_dir
            );

            app.dialog()
                .message(format!(
                    "Split complete! Segments saved to: {}",
                    summary.output_dir
                ))
                .title("Success")
                .kind(MessageDialogKind::Info)
                .blocking_show();

            Ok(summary)
        }
        Err(e) => {
            show_error(&app, &e);
            Err(e.to_string())
        }
    }
}

/// Map a pipeline error onto the dialog the user sees
fn show_error(app: &tauri::AppHandle, err: &SplitError) {
    error!("split failed: {err}");

    let (kind, message) = match err {
        SplitError::InputNotFound(_) => (MessageDialogKind::Warning, "File not found!".to_string()),
        SplitError::InvalidParams(_) => (
            MessageDialogKind::Warning,
            "Please enter valid values for duration and silence threshold.".to_string(),
        ),
        _ => (MessageDialogKind::Error, err.to_string()),
    };

    app.dialog()
        .message(message)
        .title("Error")
        .kind(kind)
        .blocking_show();
}
