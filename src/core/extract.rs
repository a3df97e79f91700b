//! Post-download handlers that unpack an archive into a single data file.
//!
//! Each handler writes through a temp file next to `outfile` and renames it into
//! place, whatever the member was called inside the archive.

use crate::error::{Error, Result};
use crate::utils::io;
use flate2::read::{GzDecoder, MultiGzDecoder};
use glob_match::glob_match;
use std::fs::File;
use std::io::Read;
use std::path::Path;

fn open(archive: &Path) -> Result<File> {
    File::open(archive).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("open archive {}", archive.display())),
        )
    })
}

fn write_member<R: Read>(mut reader: R, outfile: &Path, operation: &str) -> Result<()> {
    let mut staged = io::temp_file_beside(outfile, operation)?;
    std::io::copy(&mut reader, staged.as_file_mut())
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))?;
    io::persist(staged, outfile, operation)
}

/// Patterns containing `/` match the whole member path; others match the file name.
fn member_matches(member: &Path, pattern: &str) -> bool {
    if pattern.contains('/') {
        return member
            .to_str()
            .is_some_and(|path| glob_match(pattern, path));
    }
    member
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| glob_match(pattern, name))
}

fn no_member(source: &str, archive: &Path, pattern: &str) -> Error {
    Error::source_remote_data(
        source,
        format!(
            "No member matching '{}' in downloaded archive {}",
            pattern,
            archive.display()
        ),
        None,
    )
}

/// Extract the first regular file whose name matches `pattern` from a `.tar.gz`.
pub fn untar_member(source: &str, archive: &Path, outfile: &Path, pattern: &str) -> Result<()> {
    let mut tarball = tar::Archive::new(GzDecoder::new(open(archive)?));
    let entries = tarball
        .entries()
        .map_err(|e| Error::internal_io(e.to_string(), Some("read tarball".to_string())))?;

    for entry in entries {
        let entry =
            entry.map_err(|e| Error::internal_io(e.to_string(), Some("read tarball entry".to_string())))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry
            .path()
            .map_err(|e| Error::internal_io(e.to_string(), Some("read tarball entry path".to_string())))?
            .into_owned();
        if member_matches(&path, pattern) {
            return write_member(entry, outfile, "extract tarball member");
        }
    }

    Err(no_member(source, archive, pattern))
}

/// Extract the first file whose name matches `pattern` from a zip archive.
pub fn unzip_member(source: &str, archive: &Path, outfile: &Path, pattern: &str) -> Result<()> {
    let mut zipped = zip::ZipArchive::new(open(archive)?)
        .map_err(|e| Error::internal_io(e.to_string(), Some("read zip archive".to_string())))?;

    for i in 0..zipped.len() {
        let member = zipped
            .by_index(i)
            .map_err(|e| Error::internal_io(e.to_string(), Some("read zip entry".to_string())))?;
        if !member.is_file() {
            continue;
        }
        let Some(path) = member.enclosed_name().map(|p| p.to_path_buf()) else {
            continue;
        };
        if member_matches(&path, pattern) {
            return write_member(member, outfile, "extract zip member");
        }
    }

    Err(no_member(source, archive, pattern))
}

/// Decompress a gzip file.
pub fn gunzip(archive: &Path, outfile: &Path) -> Result<()> {
    write_member(MultiGzDecoder::new(open(archive)?), outfile, "decompress gzip")
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn build_tarball(dir: &Path, members: &[(&str, &str)]) -> std::path::PathBuf {
        let path = dir.join("bundle.tar.gz");
        let encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::fast());
        let mut builder = tar::Builder::new(encoder);
        for (name, body) in members {
            let mut header = tar::Header::new_gnu();
            header.set_size(body.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, body.as_bytes()).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
        path
    }

    fn build_zip(dir: &Path, members: &[(&str, &str)]) -> std::path::PathBuf {
        let path = dir.join("bundle.zip");
        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        for (name, body) in members {
            writer
                .start_file(*name, zip::write::FileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn untar_picks_nested_member_and_renames_it() {
        let tmp = TempDir::new().unwrap();
        let archive = build_tarball(
            tmp.path(),
            &[
                ("chembl_33/README", "readme"),
                ("chembl_33/chembl_33_sqlite/chembl_33.db", "sqlite bytes"),
            ],
        );
        let out = tmp.path().join("chembl_33.db");

        untar_member("chembl", &archive, &out, "chembl_*.db").unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "sqlite bytes");
    }

    #[test]
    fn untar_without_match_is_remote_data_error() {
        let tmp = TempDir::new().unwrap();
        let archive = build_tarball(tmp.path(), &[("other.txt", "x")]);
        let out = tmp.path().join("out.db");

        let err = untar_member("chembl", &archive, &out, "*.db").unwrap_err();
        assert_eq!(err.code.as_str(), "source.remote_data");
        assert!(!out.exists());
    }

    #[test]
    fn untar_path_pattern_skips_same_named_decoys() {
        let tmp = TempDir::new().unwrap();
        let archive = build_tarball(
            tmp.path(),
            &[
                ("HumanDiseaseOntology-2024/src/ontology/releases/doid.owl", "old"),
                ("HumanDiseaseOntology-2024/src/ontology/doid.owl", "current"),
            ],
        );
        let out = tmp.path().join("do_v2024.owl");

        untar_member("do", &archive, &out, "*/src/ontology/doid.owl").unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "current");
    }

    #[test]
    fn unzip_picks_matching_member() {
        let tmp = TempDir::new().unwrap();
        let archive = build_zip(
            tmp.path(),
            &[("notes.txt", "no"), ("Thesaurus.owl", "<owl/>")],
        );
        let out = tmp.path().join("ncit_23.09d.owl");

        unzip_member("ncit", &archive, &out, "Thesaurus.owl").unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "<owl/>");
    }

    #[test]
    fn gunzip_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("summary.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&archive).unwrap(), Compression::fast());
        encoder.write_all(b"#NCBI_GeneID\tEnsembl_Gene\n").unwrap();
        encoder.finish().unwrap();

        let out = tmp.path().join("summary.txt");
        gunzip(&archive, &out).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "#NCBI_GeneID\tEnsembl_Gene\n");
    }
}
