//! Fake yt-dlp executables

use std::path::{Path, PathBuf};

/// Output of a successful yt-dlp run, all on stdout so the order is fixed
pub const SUCCESS_SCRIPT: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$(dirname "$0")/args.txt"
echo "[youtube] Extracting URL: https://www.youtube.com/watch?v=apREl0KmTdQ"
echo "[youtube] apREl0KmTdQ: Downloading webpage"
echo "[info] apREl0KmTdQ: Downloading 1 format(s): 18"
echo "[download] Destination: Sample_Title-apREl0KmTdQ.mp4"
echo '[progress] {"status": "downloading", "downloaded_bytes": 512, "total_bytes": 1024, "filename": "Sample_Title-apREl0KmTdQ.mp4"}'
echo '[progress] {"status": "finished", "downloaded_bytes": 1024, "total_bytes": 1024, "filename": "Sample_Title-apREl0KmTdQ.mp4"}'
echo "WARNING: ffmpeg not found" >&2
exit 0
"#;

/// yt-dlp rejecting the URL
pub const FAILURE_SCRIPT: &str = r#"#!/bin/sh
echo "[generic] Extracting URL: https://example.invalid/nothing"
echo "ERROR: [generic] Unable to download webpage: Name or service not known" >&2
exit 1
"#;

/// Second run over a file that is already on disk
pub const ALREADY_DOWNLOADED_SCRIPT: &str = r#"#!/bin/sh
echo "[youtube] apREl0KmTdQ: Downloading webpage"
echo "[download] Sample_Title-apREl0KmTdQ.mp4 has already been downloaded"
exit 0
"#;

/// Latin-1 file name in the output, as yt-dlp prints it under a legacy locale
pub const NON_UTF8_SCRIPT: &str = r#"#!/bin/sh
printf '[download] Destination: Caf\351-apREl0KmTdQ.mp4\n'
echo '[progress] {"status": "finished"}'
exit 0
"#;

/// Write `body` as an executable named `yt-dlp` inside `dir`
#[cfg(unix)]
pub fn write_fake_ytdlp(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("yt-dlp");
    std::fs::write(&path, body).expect("Failed to write fake yt-dlp");
    let mut perms = std::fs::metadata(&path)
        .expect("Failed to stat fake yt-dlp")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to chmod fake yt-dlp");
    path
}
