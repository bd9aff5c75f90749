//! Backup export: the preference map, registrations, and search history
//! bundled into a timestamped `.tar.gz`.

use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{PlazaError, Result};
use crate::prefs::{KvStore, PrefStore};

/// Write a backup archive into `out_dir`, returning its path.
pub fn write_backup<S: KvStore>(
    prefs: &PrefStore<S>,
    out_dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let entries = collect_entries(prefs)?;
    let filename = format!("plaza-{}.tar.gz", now.format("%Y-%m-%d_%H-%M-%S"));
    let path = out_dir.join(filename);

    let file = File::create(&path).map_err(PlazaError::Io)?;
    write_archive(file, &entries)?;
    Ok(path)
}

fn collect_entries<S: KvStore>(prefs: &PrefStore<S>) -> Result<Vec<(String, String)>> {
    let preferences =
        serde_json::to_string_pretty(&prefs.preferences()).map_err(PlazaError::Serialization)?;
    let registrations =
        serde_json::to_string_pretty(&prefs.registrations()).map_err(PlazaError::Serialization)?;
    let history = serde_json::to_string_pretty(&prefs.search_history())
        .map_err(PlazaError::Serialization)?;

    Ok(vec![
        ("plaza/preferences.json".to_string(), preferences),
        ("plaza/registrations.json".to_string(), registrations),
        ("plaza/search-history.json".to_string(), history),
    ])
}

fn write_archive<W: Write>(writer: W, entries: &[(String, String)]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();

        tar.append_data(&mut header, name, content.as_bytes())
            .map_err(PlazaError::Io)?;
    }

    tar.finish().map_err(PlazaError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryKv;

    #[test]
    fn archive_is_gzip_and_nonempty() {
        let prefs = PrefStore::new(MemoryKv::new());
        let entries = collect_entries(&prefs).unwrap();

        let mut buf = Vec::new();
        write_archive(&mut buf, &entries).unwrap();

        assert!(!buf.is_empty());
        // Gzip magic bytes.
        assert_eq!(buf[0], 0x1f);
        assert_eq!(buf[1], 0x8b);
    }

    #[test]
    fn backup_lands_in_the_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = PrefStore::new(MemoryKv::new());
        prefs.set_preference("theme", "dark").unwrap();

        let now = "2026-09-01T08:00:00Z".parse().unwrap();
        let path = write_backup(&prefs, dir.path(), now).unwrap();

        assert!(path.exists());
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "plaza-2026-09-01_08-00-00.tar.gz"
        );
    }
}
