//! Accepted/rejected split.
//!
//! A record is rejected when its registration date failed to parse or its
//! region code is outside the configured set. Both predicates are always
//! evaluated so every reason is reported.

use std::collections::BTreeSet;

use crm_model::{CleanRecord, Partition, RejectedRecord, RejectionReason};

/// Failed predicates for `record`; empty means accepted.
pub fn rejection_reasons(
    record: &CleanRecord,
    valid_regions: &BTreeSet<String>,
) -> Vec<RejectionReason> {
    let mut reasons = Vec::new();
    if !record.registration_date.is_valid() {
        reasons.push(RejectionReason::InvalidDate);
    }
    if !valid_regions.contains(&record.region) {
        reasons.push(RejectionReason::UnknownRegion);
    }
    reasons
}

/// Splits records into disjoint accepted and rejected lists, keeping order.
pub fn partition_records(
    records: Vec<CleanRecord>,
    valid_regions: &BTreeSet<String>,
) -> Partition {
    let mut partition = Partition::default();
    for record in records {
        let reasons = rejection_reasons(&record, valid_regions);
        if reasons.is_empty() {
            partition.accepted.push(record);
        } else {
            partition.rejected.push(RejectedRecord { record, reasons });
        }
    }
    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crm_model::{Identity, PersonName, Phone, RegistrationDate, StatusTag};

    fn regions() -> BTreeSet<String> {
        ["SP", "RJ"].iter().map(|code| (*code).to_string()).collect()
    }

    fn record(region: &str, date: RegistrationDate) -> CleanRecord {
        CleanRecord {
            identity: Identity::hashed(7),
            name: PersonName::Split {
                given: "ANA".to_string(),
                family: "LIMA".to_string(),
            },
            phone: Phone::Canonical("(11)988887777".to_string()),
            region: region.to_string(),
            status: StatusTag::Regular,
            registration_date: date,
            origin: "batch".to_string(),
        }
    }

    fn valid_date() -> RegistrationDate {
        RegistrationDate::Valid(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap())
    }

    fn invalid_date() -> RegistrationDate {
        RegistrationDate::Invalid {
            raw: "not-a-date".to_string(),
        }
    }

    #[test]
    fn both_reasons_are_reported() {
        let reasons = rejection_reasons(&record("ZZ", invalid_date()), &regions());
        assert_eq!(
            reasons,
            vec![RejectionReason::InvalidDate, RejectionReason::UnknownRegion]
        );
    }

    #[test]
    fn partition_is_disjoint_and_exhaustive() {
        let records = vec![
            record("SP", valid_date()),
            record("SP", invalid_date()),
            record("ZZ", valid_date()),
            record("RJ", valid_date()),
        ];
        let partition = partition_records(records, &regions());
        assert_eq!(partition.total(), 4);
        assert_eq!(partition.accepted.len(), 2);
        assert_eq!(partition.accepted[1].region, "RJ");
        assert!(partition.rejected[0].has_reason(RejectionReason::InvalidDate));
        assert!(partition.rejected[1].has_reason(RejectionReason::UnknownRegion));
        assert!(!partition.rejected[1].has_reason(RejectionReason::InvalidDate));
    }
}
