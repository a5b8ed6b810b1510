#![allow(dead_code)]

use std::fs;

use lipstudio::config::AppConfig;
use tempfile::TempDir;

/// Stand-in for Wav2Lip's `inference.py`: prints a line, writes the file
/// named by `--outfile` and exits 0. Run through `sh` instead of `python`.
pub const LIP_SYNC_OK: &str = r#"
out=""
while [ "$#" -gt 0 ]; do
  case "$1" in
    --outfile) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
echo "lip-sync ok"
printf 'synced-bytes' > "$out"
"#;

/// Stand-in that fails the way a missing checkpoint does.
pub const LIP_SYNC_FAIL: &str = r#"
echo "Error: checkpoint not found" >&2
exit 3
"#;

/// Exits 0 without writing the promised output file.
pub const LIP_SYNC_SILENT: &str = "exit 0\n";

/// Never finishes within any reasonable stage timeout.
pub const LIP_SYNC_HANG: &str = "sleep 5\n";

/// What the enhance stand-ins write: a minimal mp4 header (`ftyp` box), so
/// anything sniffing the artifact's leading bytes sees `video/mp4`.
pub const ENHANCED_BYTES: &[u8] = b"\x00\x00\x00\x18ftypisom\x00\x00\x02\x00isomiso2";

/// Stand-in for CodeFormer's `inference_codeformer.py`.
pub const ENHANCE_OK: &str = r#"
out=""
while [ "$#" -gt 0 ]; do
  case "$1" in
    --output_path) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
echo "enhance ok"
printf '\000\000\000\030ftypisom\000\000\002\000isomiso2' > "$out"
"#;

/// Like `ENHANCE_OK`, but also drops an `invoked` marker next to itself so
/// tests can prove whether stage two ever ran.
pub const ENHANCE_MARKER: &str = r#"
touch "$(dirname "$0")/invoked"
out=""
while [ "$#" -gt 0 ]; do
  case "$1" in
    --output_path) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
printf '\000\000\000\030ftypisom\000\000\002\000isomiso2' > "$out"
"#;

/// Exits 0 without writing the final artifact.
pub const ENHANCE_SILENT: &str = "exit 0\n";

pub struct Fixture {
    pub root: TempDir,
    pub config: AppConfig,
}

impl Fixture {
    /// True if the enhance stand-in dropped its `invoked` marker.
    pub fn enhance_invoked(&self) -> bool {
        self.config.codeformer_dir().join("invoked").exists()
    }
}

/// Lay out both tool directories with the given scripts as their inference
/// entry points, plus an empty scratch directory. The returned config points
/// `python_bin` at `sh` so the scripts run without Python.
pub fn fixture(lip_sync_script: &str, enhance_script: &str) -> Fixture {
    let root = TempDir::new().expect("create fixture dir");
    let tools_root = root.path().join("tools");
    let work_dir = root.path().join("work");

    fs::create_dir_all(tools_root.join("Wav2Lip").join("checkpoints")).unwrap();
    fs::create_dir_all(tools_root.join("CodeFormer").join("checkpoints")).unwrap();
    fs::write(
        tools_root.join("Wav2Lip").join("inference.py"),
        lip_sync_script,
    )
    .unwrap();
    fs::write(
        tools_root.join("CodeFormer").join("inference_codeformer.py"),
        enhance_script,
    )
    .unwrap();
    fs::create_dir_all(&work_dir).unwrap();

    let config = AppConfig {
        tools_root,
        work_dir,
        python_bin: "sh".to_string(),
        ..AppConfig::default()
    };

    Fixture { root, config }
}
