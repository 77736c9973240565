//! Mirroring source asset directories into the target tree with symlinks.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Chainable, Result};
use crate::util::{list_dir, Entries};

/// Removes whatever is at `path`, if anything: a file, a symlink (without
/// following it), or a whole directory.
fn remove_existing(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn symlink(source: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, dest)
}

#[cfg(windows)]
fn symlink(source: &Path, dest: &Path) -> io::Result<()> {
    match source.is_dir() {
        true => std::os::windows::fs::symlink_dir(source, dest),
        false => std::os::windows::fs::symlink_file(source, dest),
    }
}

/// (Re)creates a link at `dest` pointing at the absolute path of `source`.
pub fn link(source: &Path, dest: &Path) -> Result<()> {
    // A relative target would resolve against the link's own directory.
    let source = fs::canonicalize(source).chain_with(|| error! {
        "failed to resolve asset",
        "path" => source.display(),
    })?;

    remove_existing(dest).chain_with(|| error! {
        "failed to remove existing asset",
        "path" => dest.display(),
    })?;

    symlink(&source, dest).chain_with(|| error! {
        "failed to link asset",
        "source" => source.display(),
        "destination" => dest.display(),
    })
}

/// Links every entry of `source_dir`, dotfiles and directories included, into
/// `target_dir` under the same name, replacing anything already there.
/// Returns the number of links.
pub fn link_all(source_dir: &Path, target_dir: &Path) -> Result<usize> {
    let entries = list_dir(source_dir, Entries::All)?;
    for source in &entries {
        let Some(name) = source.file_name() else { continue };
        let dest = target_dir.join(name);
        log::debug!("linking asset: {} -> {}", dest.display(), source.display());
        link(source, &dest)?;
    }

    Ok(entries.len())
}

#[cfg(all(test, unix))]
mod assets_tests {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::*;

    /// Every entry of `dir` with its link target, if it is a link.
    fn snapshot(dir: &Path) -> BTreeMap<String, Option<PathBuf>> {
        fs::read_dir(dir).unwrap()
            .map(|e| e.unwrap())
            .map(|e| (e.file_name().to_string_lossy().into_owned(), fs::read_link(e.path()).ok()))
            .collect()
    }

    #[test]
    fn links_point_at_absolute_sources() {
        let site = tempfile::tempdir().unwrap();
        let (images, target) = (site.path().join("images"), site.path().join("assets"));
        fs::create_dir_all(images.join("2020")).unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(images.join("a.jpg"), "jpg").unwrap();

        assert_eq!(link_all(&images, &target).unwrap(), 2);

        let link = fs::read_link(target.join("a.jpg")).unwrap();
        assert!(link.is_absolute());
        assert_eq!(link, fs::canonicalize(images.join("a.jpg")).unwrap());
        assert_eq!(fs::read_to_string(target.join("a.jpg")).unwrap(), "jpg");
        assert!(target.join("2020").is_dir());
    }

    #[test]
    fn relinking_is_idempotent() {
        let site = tempfile::tempdir().unwrap();
        let (images, target) = (site.path().join("images"), site.path().join("assets"));
        fs::create_dir_all(images.join("dir")).unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(images.join("a.png"), "png").unwrap();
        fs::write(images.join("b.png"), "png").unwrap();

        link_all(&images, &target).unwrap();
        let first = snapshot(&target);
        link_all(&images, &target).unwrap();
        assert_eq!(snapshot(&target), first);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn replaces_stale_files_and_directories() {
        let site = tempfile::tempdir().unwrap();
        let (images, target) = (site.path().join("images"), site.path().join("assets"));
        fs::create_dir_all(&images).unwrap();
        fs::create_dir_all(target.join("a.png")).unwrap();
        fs::write(target.join("a.png").join("junk"), "").unwrap();
        fs::write(images.join("a.png"), "png").unwrap();

        link_all(&images, &target).unwrap();
        assert!(fs::symlink_metadata(target.join("a.png")).unwrap().file_type().is_symlink());
    }

    #[test]
    fn dotfiles_are_linked_too() {
        let site = tempfile::tempdir().unwrap();
        let (images, target) = (site.path().join("images"), site.path().join("assets"));
        fs::create_dir_all(images.join(".well-known")).unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(images.join(".htaccess"), "deny").unwrap();

        assert_eq!(link_all(&images, &target).unwrap(), 2);
        assert_eq!(fs::read_to_string(target.join(".htaccess")).unwrap(), "deny");
        assert!(fs::symlink_metadata(target.join(".well-known")).unwrap().file_type().is_symlink());
    }

    #[test]
    fn missing_source_directory_fails() {
        let site = tempfile::tempdir().unwrap();
        let error = link_all(&site.path().join("nope"), site.path()).unwrap_err();
        assert_eq!(error.kind(), Some(crate::error::Kind::Io));
    }
}
