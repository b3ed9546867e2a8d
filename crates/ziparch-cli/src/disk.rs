//! Free disk space lookup.

use std::path::Path;
use sysinfo::Disks;
use tracing::debug;
use tracing::warn;

/// Returns the bytes available on the filesystem holding `path`.
///
/// The disk whose mount point is the longest prefix of `path` wins. When
/// no disk matches, 0 is returned, which yields a zero size budget.
pub fn available_space(path: &Path) -> u64 {
    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .filter(|disk| path.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len());

    if let Some(disk) = disk {
        let available = disk.available_space();
        debug!(
            mount_point = %disk.mount_point().display(),
            available,
            "free space resolved"
        );
        available
    } else {
        warn!(path = %path.display(), "no disk found for path, assuming no free space");
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_path_has_no_space() {
        assert_eq!(available_space(Path::new("relative/never/mounted")), 0);
    }
}
