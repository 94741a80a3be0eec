//! CSV persistence for record batches.
//!
//! Writes go to a temporary file beside the destination and are renamed
//! into place only after the last row is flushed. A failed write leaves
//! no file at the destination. The file is created 0666 less the umask,
//! like any plain create, so other users can read the batch.

use crate::{
    error::{FixtureError, FixtureResult},
    record::CustomerRecord,
};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".stage-fixture");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

pub fn write_records(path: impl AsRef<Path>, records: &[CustomerRecord]) -> FixtureResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = temp_file_in(dir)?;

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(tmp.as_file());
        if records.is_empty() {
            writer.write_record(CustomerRecord::COLUMNS)?;
        }
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| FixtureError::Io(e.error))?;

    log::info!("csv: wrote {} records to {}", records.len(), path.display());
    Ok(())
}

pub fn read_records(path: impl AsRef<Path>) -> FixtureResult<Vec<CustomerRecord>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.iter().ne(CustomerRecord::COLUMNS) {
        return Err(FixtureError::Format {
            reason: format!(
                "{} has header {:?}, expected {:?}",
                path.display(),
                headers.iter().collect::<Vec<_>>(),
                CustomerRecord::COLUMNS
            ),
        });
    }

    let records = reader
        .deserialize::<CustomerRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("csv: read {} records from {}", records.len(), path.display());
    Ok(records)
}
