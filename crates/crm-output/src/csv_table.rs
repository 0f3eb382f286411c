//! Accepted and rejected CSV tables.
//!
//! Both tables share [`CLEAN_RECORD_COLUMNS`]; the header row is always
//! written, so an empty partition side still produces a valid file.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crm_model::{CLEAN_RECORD_COLUMNS, CleanRecord, Partition};

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Paths written by [`write_partition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionOutputs {
    pub accepted: PathBuf,
    pub rejected: PathBuf,
}

/// Writes `records` to `path` with the clean-record header.
///
/// Returns the number of data rows written.
pub fn write_records<'a, I>(path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a CleanRecord>,
{
    ensure_parent_dir(path)?;
    let csv_error = |source| OutputError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer.write_record(CLEAN_RECORD_COLUMNS).map_err(csv_error)?;
    let mut rows = 0usize;
    for record in records {
        writer.write_record(record.to_row()).map_err(csv_error)?;
        rows += 1;
    }
    writer.flush().map_err(|source| OutputError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), rows, "wrote CSV table");
    Ok(rows)
}

/// Writes both sides of `partition`, creating missing directories.
pub fn write_partition(
    partition: &Partition,
    accepted_path: &Path,
    rejected_path: &Path,
) -> Result<PartitionOutputs> {
    let accepted = write_records(accepted_path, &partition.accepted)?;
    let rejected = write_records(
        rejected_path,
        partition.rejected.iter().map(|rejected| &rejected.record),
    )?;
    info!(
        accepted,
        rejected,
        accepted_path = %accepted_path.display(),
        rejected_path = %rejected_path.display(),
        "partition written"
    );
    Ok(PartitionOutputs {
        accepted: accepted_path.to_path_buf(),
        rejected: rejected_path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_model::{Identity, PersonName, Phone, RegistrationDate, StatusTag};
    use tempfile::TempDir;

    #[test]
    fn empty_table_still_has_a_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("empty.csv");
        let rows = write_records(&path, &Vec::<CleanRecord>::new()).unwrap();
        assert_eq!(rows, 0);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Hash Cliente,Nome,Sobrenome,Contato,UF,Status do Cliente,Data Cadastro,Origem\n"
        );
    }

    #[test]
    fn cells_with_commas_are_quoted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let record = CleanRecord {
            identity: Identity::Missing,
            name: PersonName::Unsplit { token_count: 5 },
            phone: Phone::Unparseable,
            region: "SP".to_string(),
            status: StatusTag::Regular,
            registration_date: RegistrationDate::Invalid {
                raw: "x".to_string(),
            },
            origin: "lote 1, parte 2".to_string(),
        };
        write_records(&path, [&record]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with(",,,unparseable,SP,REGULAR,invalido,\"lote 1, parte 2\"\n"));
    }
}
