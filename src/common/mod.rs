use std::sync::LazyLock;

use tokio::runtime::{Builder, Runtime};

/// Container formats accepted for the face video upload.
pub const VALID_VIDEO_EXTENSIONS: &'static [&'static str] = &["mp4"];

/// Formats accepted for the driving audio upload.
pub const VALID_AUDIO_EXTENSIONS: &'static [&'static str] = &["mp3", "wav"];

/// Name of the lip-synced intermediate written by the first stage.
pub const LIP_SYNCED_OUTPUT_NAME: &'static str = "final_output.mp4";

/// Name of the enhanced final artifact written by the second stage.
pub const ENHANCED_OUTPUT_NAME: &'static str = "enhanced_output.mp4";

// Rocket-specific Tokio Runtime
// This runtime is dedicated to handling network requests, with thread names clearly labeled.
pub static ROCKET_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    Builder::new_multi_thread()
        .thread_name("rocket-io-worker")
        .enable_all()
        .build()
        .expect("Failed to build Rocket Tokio runtime")
});
