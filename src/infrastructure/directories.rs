use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

pub fn ensure_dir(path: &str) -> Result<PathBuf> {
    let dir = PathBuf::from(path);
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("failed to create directory {}", path))?;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(&dir) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o755);
            let _ = fs::set_permissions(&dir, perms);
        }
    }

    let probe_file = dir.join(".write-test");
    fs::write(&probe_file, b"ok")
        .with_context(|| format!("directory {} is not writable", dir.display()))?;
    fs::remove_file(&probe_file)?;

    Ok(dir.canonicalize().unwrap_or(dir))
}
