//! End-to-end tests for the record pipeline.

use chrono::NaiveDate;
use crm_ingest::RawTable;
use crm_model::{
    DateOrder, Identity, PersonName, PipelineConfig, RegistrationDate, RejectionReason, StatusTag,
};
use crm_transform::{RecordPipeline, stable_hash};

const HEADERS: [&str; 6] = [
    "Nome completo",
    "Contato",
    "UF",
    "Data Cadastro",
    "Observações",
    "Extra Info",
];

fn table(rows: &[[&str; 6]]) -> RawTable {
    RawTable::new(
        HEADERS.iter().map(|h| (*h).to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect(),
    )
}

fn sample_batch() -> RawTable {
    table(&[
        ["+ Maria da Silva.", "(11) 9999-8888", "sp", "2023-01-15", "Cliente VIP", "a"],
        ["João Souza", "21 98888-7777", "RJ", "not-a-date", "", "b"],
        ["Ana Carolina Pereira", "31 97777-6666", "ZZ", "2022-07-04", "VIP", "c"],
        ["A", "41 96666-5555", "PR", "2021-03-09", "", "d"],
        ["+ Maria da Silva.", "(11) 9999-8888", "sp", "2023-01-15", "outra nota", "e"],
        ["Luiz Carlos de Almeida", "sem telefone", "mg", "12/31/2020", "", "f"],
    ])
}

fn run(batch: &RawTable) -> crm_transform::BatchOutcome {
    RecordPipeline::new(PipelineConfig::default())
        .expect("default config")
        .run(batch, "raw_data/clientes.csv")
        .expect("run pipeline")
}

#[test]
fn batch_is_partitioned_on_date_and_region() {
    let outcome = run(&sample_batch());
    let stats = outcome.stats;

    assert_eq!(stats.input_rows, 6);
    assert_eq!(stats.duplicates_removed, 1);
    assert_eq!(stats.accepted, 3);
    assert_eq!(stats.rejected, 2);
    assert_eq!(stats.invalid_dates, 1);
    assert_eq!(stats.unknown_regions, 1);
    assert_eq!(stats.unsplit_names, 1);
    assert_eq!(stats.missing_identities, 1);
    assert_eq!(stats.vip, 2);

    let accepted = &outcome.partition.accepted;
    assert_eq!(accepted[0].name.given_name(), "MARIA");
    assert_eq!(accepted[0].name.family_name(), "DA SILVA");
    assert_eq!(accepted[0].phone.as_str(), "(11)999998888");
    assert_eq!(accepted[0].status, StatusTag::Vip);
    assert_eq!(accepted[0].registration_date.render(), "2023-01-15");
    assert_eq!(accepted[0].origin, "raw_data/clientes.csv");
    assert_eq!(
        accepted[0].identity,
        Identity::Hashed(stable_hash("(11)999998888"))
    );

    assert_eq!(accepted[1].name, PersonName::Unsplit { token_count: 1 });
    assert_eq!(accepted[1].region, "PR");

    assert_eq!(accepted[2].name.given_name(), "LUIZ CARLOS");
    assert_eq!(accepted[2].name.family_name(), "DE ALMEIDA");
    assert_eq!(accepted[2].identity, Identity::Missing);
    assert_eq!(accepted[2].phone.as_str(), "unparseable");
    assert_eq!(
        accepted[2].registration_date,
        RegistrationDate::Valid(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap())
    );

    let rejected = &outcome.partition.rejected;
    assert_eq!(rejected[0].record.name.given_name(), "JOAO");
    assert_eq!(rejected[0].reasons, vec![RejectionReason::InvalidDate]);
    assert_eq!(rejected[0].record.registration_date.render(), "invalido");
    assert_eq!(rejected[1].record.name.given_name(), "ANA CAROLINA");
    assert_eq!(rejected[1].reasons, vec![RejectionReason::UnknownRegion]);
}

#[test]
fn invalid_date_rejects_even_with_valid_region() {
    let outcome = run(&table(&[[
        "Ana Lima",
        "11988887777",
        "SP",
        "31/02/2023",
        "",
        "",
    ]]));
    assert!(outcome.partition.accepted.is_empty());
    assert_eq!(
        outcome.partition.rejected[0].reasons,
        vec![RejectionReason::InvalidDate]
    );
}

#[test]
fn unknown_region_rejects_even_with_valid_date() {
    let outcome = run(&table(&[[
        "Ana Lima",
        "11988887777",
        "ZZ",
        "2023-02-01",
        "",
        "",
    ]]));
    assert!(outcome.partition.accepted.is_empty());
    assert_eq!(
        outcome.partition.rejected[0].reasons,
        vec![RejectionReason::UnknownRegion]
    );
}

#[test]
fn runs_are_idempotent() {
    let batch = sample_batch();
    assert_eq!(run(&batch), run(&batch));
}

#[test]
fn day_first_order_changes_ambiguous_dates() {
    let batch = table(&[["Ana Lima", "11988887777", "SP", "01/02/2023", "", ""]]);
    let month_first = run(&batch);
    let day_first = RecordPipeline::new(PipelineConfig::default().with_date_order(DateOrder::DayFirst))
        .unwrap()
        .run(&batch, "lote")
        .unwrap();
    assert_eq!(
        month_first.partition.accepted[0].registration_date.render(),
        "2023-01-02"
    );
    assert_eq!(
        day_first.partition.accepted[0].registration_date.render(),
        "2023-02-01"
    );
}

#[test]
fn custom_region_set_is_honoured() {
    let batch = table(&[["Ana Lima", "11988887777", "SP", "2023-02-01", "", ""]]);
    let outcome = RecordPipeline::new(PipelineConfig::default().with_valid_regions(["RJ"]))
        .unwrap()
        .run(&batch, "lote")
        .unwrap();
    assert_eq!(outcome.stats.unknown_regions, 1);
}

#[test]
fn missing_required_column_stops_the_batch() {
    let batch = RawTable::new(
        vec!["Nome completo".to_string(), "Contato".to_string()],
        vec![vec!["Ana".to_string(), "11".to_string()]],
    );
    let result = RecordPipeline::new(PipelineConfig::default())
        .unwrap()
        .run(&batch, "lote");
    assert!(result.is_err());
}

#[test]
fn two_digit_years_are_accepted_with_the_full_year() {
    let outcome = run(&table(&[["Ana Lima", "11988887777", "SP", "15/01/23", "", ""]]));
    assert_eq!(outcome.stats.invalid_dates, 0);
    assert_eq!(
        outcome.partition.accepted[0].registration_date.render(),
        "2023-01-15"
    );
}
