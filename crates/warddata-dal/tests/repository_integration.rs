//! Integration tests for the ward repository.
//!
//! These tests drive the public `WardRepository` API against a scripted
//! in-memory data source and assert both the returned records and the exact
//! statements that reached the source.

use std::sync::Arc;

use serde_json::{Value, json};
use time::macros::date;
use warddata_config::HospitalConfig;
use warddata_core::{EpisodeId, SqlValue, WardError};
use warddata_dal::{ListRequest, WardRepository};
use warddata_db::{MemorySource, row};
use warddata_query::SortOrder;

// =============================================================================
// Fixtures
// =============================================================================

fn hospital_document(family: &str) -> Value {
    json!({
        "dbms": { "family": family },
        "queries": {
            "specialties": "SELECT COD_SERV, DES_SERV FROM servicos_ativos ORDER BY DES_SERV",
            "episode_ids": "SELECT NUM_EPISODIO FROM internados_ids",
            "recent_patients": {
                "sql": "SELECT i.NUM_EPISODIO, d.NOME, i.SALA, i.CAMA, i.DATA_ENTRADA, i.HORA_ENTRADA FROM internados_recentes i JOIN doentes d ON d.ID = i.DOENTE",
                "filter": "i.DATA_ALTA IS NULL",
                "order_by": "i.DATA_ENTRADA DESC, i.HORA_ENTRADA DESC"
            },
            "patient_list": {
                "sql": "SELECT i.NUM_EPISODIO, d.NOME, i.SALA, i.CAMA, i.DATA_ENTRADA, i.HORA_ENTRADA FROM internados_lista i JOIN doentes d ON d.ID = i.DOENTE",
                "filter": "i.DATA_ALTA IS NULL"
            },
            "patient_list_count": {
                "sql": "SELECT COUNT(*) AS TOTAL FROM internados_lista i JOIN doentes d ON d.ID = i.DOENTE",
                "filter": "i.DATA_ALTA IS NULL"
            },
            "latest_diary_key": "SELECT DATA_DIARIO, HORA_DIARIO FROM diario_chave WHERE EPISODIO = %s ORDER BY DATA_DIARIO DESC, HORA_DIARIO DESC",
            "latest_diary_text": "SELECT DIARIO AS ULT_DIARIO FROM diario_texto WHERE EPISODIO = %s AND DATA_DIARIO = %s AND HORA_DIARIO = %s",
            "patient_details": {
                "sql": "SELECT i.NUM_EPISODIO, d.NOME, i.SALA, i.CAMA, i.DATA_ENTRADA, i.HORA_ENTRADA, s.DES_SERV FROM internados_detalhe i JOIN doentes d ON d.ID = i.DOENTE JOIN servicos s ON s.COD_SERV = i.COD_SERV"
            },
            "note_items": "SELECT ITEM, VALOR FROM ainicial_itens WHERE EPISODIO = %s AND ITEM IN (%s, %s) ORDER BY ORDEM",
            "phones": "SELECT TELEFONE, TELEMOVEL FROM telefones WHERE EPISODIO = %s",
            "observations": "SELECT OBSERVACOES FROM observacoes WHERE EPISODIO = %s",
            "significant_contacts": "SELECT PESSOA_SIGNIF FROM pessoas_signif WHERE EPISODIO = %s",
            "symptoms": "SELECT DTA_FENOM, HORA_FENOM, FENOMENO, DEF_FENOM FROM fenomenos WHERE EPISODIO = %s",
            "medications": "SELECT FARMACO, VIA, DOSE, HORARIO FROM medicacao WHERE EPISODIO = %s",
            "interventions": "SELECT ATITUDE, HORARIO_AT FROM atitudes WHERE EPISODIO = %s",
            "lab_tests": "SELECT ANALISE, DTA_ANL, HORA_ANL FROM analises WHERE EPISODIO = %s",
            "exams": "SELECT EXAME, DTA_EXM FROM exames WHERE EPISODIO = %s",
            "diary": "SELECT DIARIO, DATA_DIARIO, HORA_DIARIO FROM diarios WHERE EPISODIO = %s",
            "episode_by_name": {
                "sql": "SELECT i.NUM_EPISODIO FROM internados_nome i JOIN doentes d ON d.ID = i.DOENTE",
                "order_by": "i.DATA_ENTRADA DESC"
            }
        },
        "columns": {
            "episode_pk": "NUM_EPISODIO",
            "patient_name": "NOME",
            "room": "SALA",
            "bed": "CAMA",
            "admission_date": "DATA_ENTRADA",
            "admission_time": "HORA_ENTRADA",
            "specialty_name": "DES_SERV",
            "specialty_fk": "COD_SERV",
            "specialty_code": "COD_SERV",
            "specialty_description": "DES_SERV",
            "note_item_type": "ITEM",
            "note_item_value": "VALOR",
            "home_phone": "TELEFONE",
            "mobile_phone": "TELEMOVEL",
            "observation": "OBSERVACOES",
            "significant_contact": "PESSOA_SIGNIF",
            "symptom_date": "DTA_FENOM",
            "symptom_time": "HORA_FENOM",
            "symptom": "FENOMENO",
            "symptom_definition": "DEF_FENOM",
            "drug": "FARMACO",
            "route": "VIA",
            "dose": "DOSE",
            "medication_schedule": "HORARIO",
            "intervention": "ATITUDE",
            "intervention_schedule": "HORARIO_AT",
            "lab_test": "ANALISE",
            "lab_test_date": "DTA_ANL",
            "lab_test_time": "HORA_ANL",
            "exam": "EXAME",
            "exam_date": "DTA_EXM",
            "diary": "DIARIO",
            "diary_date": "DATA_DIARIO",
            "diary_time": "HORA_DIARIO",
            "latest_diary": "ULT_DIARIO"
        },
        "sorting": {
            "patient_list": {
                "admission_date": "DATA_ENTRADA",
                "admission_time": "HORA_ENTRADA",
                "name": "NOME",
                "room": "SALA",
                "bed": "CAMA",
                "episode_id": "NUM_EPISODIO"
            }
        },
        "parameters": {
            "history_item": "ANTEC",
            "diagnosis_item": "DIAG"
        }
    })
}

fn repository(family: &str, source: MemorySource) -> (WardRepository, Arc<MemorySource>) {
    let config = HospitalConfig::new(hospital_document(family)).unwrap();
    config.validate().unwrap();
    let source = Arc::new(source);
    (
        WardRepository::from_parts(source.clone(), Arc::new(config)),
        source,
    )
}

fn id(value: &str) -> SqlValue {
    EpisodeId::parse(value).unwrap().to_sql_value()
}

fn episode_row(pk: i64, name: &str) -> warddata_core::Row {
    row([
        ("NUM_EPISODIO", SqlValue::Integer(pk)),
        ("NOME", name.into()),
        ("SALA", SqlValue::Integer(2)),
        ("CAMA", "B".into()),
        ("DATA_ENTRADA", SqlValue::Date(date!(2024 - 03 - 07))),
        ("HORA_ENTRADA", SqlValue::Integer(36_000)),
    ])
}

// =============================================================================
// Simple builders
// =============================================================================

#[tokio::test]
async fn specialties_are_standardized() {
    let source = MemorySource::new().on(
        "FROM servicos_ativos",
        vec![
            row([("COD_SERV", SqlValue::Integer(1)), ("DES_SERV", "Cardiologia".into())]),
            row([("COD_SERV", SqlValue::Null), ("DES_SERV", SqlValue::Null)]),
        ],
    );
    let (repo, _) = repository("postgres", source);

    let specialties = repo.specialties().await.unwrap();
    assert_eq!(specialties.len(), 1);
    assert_eq!(specialties[0].code.as_deref(), Some("1"));
    assert_eq!(specialties[0].name.as_deref(), Some("Cardiologia"));
}

#[tokio::test]
async fn episode_ids_skip_non_numeric_keys() {
    let source = MemorySource::new().on(
        "FROM internados_ids",
        vec![
            row([("NUM_EPISODIO", SqlValue::Integer(1001))]),
            row([("NUM_EPISODIO", SqlValue::Null)]),
            row([("NUM_EPISODIO", SqlValue::from("n/a"))]),
            row([("NUM_EPISODIO", SqlValue::from("1002"))]),
        ],
    );
    let (repo, _) = repository("postgres", source);

    let ids: Vec<String> = repo
        .episode_ids()
        .await
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(ids, vec!["1001", "1002"]);
}

#[tokio::test]
async fn recent_patients_with_and_without_specialty() {
    let source = MemorySource::new().on("FROM internados_recentes", vec![episode_row(1001, "ANA")]);
    let (repo, source) = repository("sqlserver", source);

    let patients = repo.recent_patients(Some("12")).await.unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].patient_name.as_deref(), Some("ANA"));
    assert_eq!(patients[0].admission_date.as_deref(), Some("07-03-2024"));
    assert_eq!(patients[0].admission_time.as_deref(), Some("10:00"));

    repo.recent_patients(None).await.unwrap();

    let calls = source.calls().await;
    assert_eq!(calls.len(), 2);
    assert!(calls[0].sql.ends_with(
        "WHERE (i.DATA_ALTA IS NULL) AND i.COD_SERV = ? ORDER BY i.DATA_ENTRADA DESC, i.HORA_ENTRADA DESC OFFSET ? ROWS FETCH NEXT ? ROWS ONLY"
    ));
    assert_eq!(
        calls[0].params,
        vec![SqlValue::Integer(12), SqlValue::Integer(0), SqlValue::Integer(10)]
    );
    assert!(calls[1].sql.contains("WHERE i.DATA_ALTA IS NULL ORDER BY"));
    assert_eq!(calls[1].params, vec![SqlValue::Integer(0), SqlValue::Integer(10)]);
}

#[tokio::test]
async fn recent_patients_are_bounded_per_family() {
    let mut document = hospital_document("postgres");
    document["parameters"]["recent_limit"] = json!(5);
    let source = Arc::new(MemorySource::new());
    let repo = WardRepository::from_parts(
        source.clone(),
        Arc::new(HospitalConfig::new(document).unwrap()),
    );
    repo.recent_patients(None).await.unwrap();

    let calls = source.calls().await;
    assert!(calls[0].sql.ends_with("HORA_ENTRADA DESC LIMIT $1 OFFSET $2"));
    assert_eq!(calls[0].params, vec![SqlValue::Integer(5), SqlValue::Integer(0)]);

    let (repo, source) = repository("informix", MemorySource::new());
    repo.recent_patients(None).await.unwrap();
    let calls = source.calls().await;
    assert!(calls[0].sql.ends_with("ORDER BY i.DATA_ENTRADA DESC, i.HORA_ENTRADA DESC"));
    assert!(calls[0].params.is_empty());
}

// =============================================================================
// Paginated listing
// =============================================================================

#[tokio::test]
async fn zero_count_short_circuits() {
    let source = MemorySource::new()
        .on("COUNT(*) AS TOTAL", vec![row([("TOTAL", 0)])])
        .on("FROM internados_lista", vec![episode_row(1001, "ANA")]);
    let (repo, source) = repository("postgres", source);

    let page = repo
        .patient_page(&ListRequest::default().search("Nobody"))
        .await
        .unwrap();

    assert!(page.patients.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(source.call_count().await, 1);
}

#[tokio::test]
async fn page_uses_limit_offset_on_postgres() {
    let source = MemorySource::new()
        .on("COUNT(*) AS TOTAL", vec![row([("TOTAL", 25)])])
        .on(
            "FROM internados_lista",
            vec![episode_row(1001, "ANA"), episode_row(1002, "RUI")],
        );
    let (repo, source) = repository("postgres", source);

    let request = ListRequest::default()
        .page(3, 10)
        .specialty("7")
        .sort("name", SortOrder::Asc)
        .search("ana");
    let page = repo.patient_page(&request).await.unwrap();

    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 3);
    assert_eq!(page.patients.len(), 2);

    let data = source.calls_matching("SELECT i.NUM_EPISODIO, d.NOME").await;
    assert_eq!(data.len(), 1);
    assert!(data[0].sql.ends_with(
        "WHERE (i.DATA_ALTA IS NULL) AND i.COD_SERV = $1 AND UPPER(d.NOME) LIKE $2 ORDER BY d.NOME ASC LIMIT $3 OFFSET $4"
    ));
    assert_eq!(
        data[0].params,
        vec![
            SqlValue::Integer(7),
            SqlValue::from("%ANA%"),
            SqlValue::Integer(10),
            SqlValue::Integer(20),
        ]
    );

    let count = source.calls_matching("COUNT(*)").await;
    assert_eq!(count[0].params, vec![SqlValue::Integer(7), SqlValue::from("%ANA%")]);
}

#[tokio::test]
async fn page_uses_offset_fetch_on_sqlserver_and_oracle() {
    for (family, tail) in [
        ("sqlserver", "OFFSET ? ROWS FETCH NEXT ? ROWS ONLY"),
        ("oracle", "OFFSET :2 ROWS FETCH NEXT :3 ROWS ONLY"),
    ] {
        let source = MemorySource::new()
            .on("COUNT(*) AS TOTAL", vec![row([("TOTAL", 25)])])
            .on("FROM internados_lista", vec![episode_row(1001, "ANA")]);
        let (repo, source) = repository(family, source);

        repo.patient_page(&ListRequest::default().page(3, 10).search("1001"))
            .await
            .unwrap();

        let data = source.calls_matching("SELECT i.NUM_EPISODIO, d.NOME").await;
        assert!(data[0].sql.ends_with(tail), "{family}: {}", data[0].sql);
        assert!(data[0].sql.contains("ORDER BY i.DATA_ENTRADA DESC, i.HORA_ENTRADA DESC"));
        assert_eq!(
            data[0].params,
            vec![id("1001"), SqlValue::Integer(20), SqlValue::Integer(10)]
        );
    }
}

#[tokio::test]
async fn numeric_search_never_filters_by_name() {
    let source = MemorySource::new().on("COUNT(*) AS TOTAL", vec![row([("TOTAL", 0)])]);
    let (repo, source) = repository("postgres", source);

    repo.patient_page(&ListRequest::default().search("12345"))
        .await
        .unwrap();

    let calls = source.calls().await;
    assert!(calls[0].sql.contains("i.NUM_EPISODIO = $1"));
    assert!(!calls[0].sql.contains("UPPER"));
    assert_eq!(calls[0].params, vec![id("12345")]);
}

#[tokio::test]
async fn enrichment_attaches_latest_diary_and_tolerates_failures() {
    let source = MemorySource::new()
        .on("COUNT(*) AS TOTAL", vec![row([("TOTAL", 2)])])
        .on(
            "FROM internados_lista",
            vec![episode_row(1001, "ANA"), episode_row(1002, "RUI")],
        )
        .on_params(
            "FROM diario_chave",
            vec![id("1001")],
            vec![row([
                ("DATA_DIARIO", SqlValue::Date(date!(2024 - 03 - 08))),
                ("HORA_DIARIO", SqlValue::Integer(30_600)),
            ])],
        )
        .fail_on_params("FROM diario_chave", vec![id("1002")], "deadlock detected")
        .on("FROM diario_texto", vec![row([("ULT_DIARIO", "Estável")])]);
    let (repo, source) = repository("postgres", source);

    let page = repo.patient_page(&ListRequest::default()).await.unwrap();

    assert_eq!(page.patients.len(), 2);
    assert_eq!(page.patients[0].latest_diary.as_deref(), Some("Estável"));
    assert_eq!(page.patients[1].latest_diary, None);

    let text_calls = source.calls_matching("FROM diario_texto").await;
    assert_eq!(text_calls.len(), 1);
    assert_eq!(
        text_calls[0].params,
        vec![
            id("1001"),
            SqlValue::Date(date!(2024 - 03 - 08)),
            SqlValue::Integer(30_600)
        ]
    );
}

#[tokio::test]
async fn invalid_listing_requests_fail_before_any_query() {
    let (repo, source) = repository("postgres", MemorySource::new());

    let err = repo
        .patient_page(&ListRequest::default().sort("favourite_colour", SortOrder::Asc))
        .await
        .unwrap_err();
    assert_eq!(err.category().to_string(), "invalid_request");

    let err = repo
        .patient_page(&ListRequest::default().page(0, 10))
        .await
        .unwrap_err();
    assert_eq!(err.category().to_string(), "invalid_request");

    let err = repo
        .patient_page(&ListRequest::default().sort("specialty", SortOrder::Asc))
        .await
        .unwrap_err();
    assert_eq!(err.category().to_string(), "invalid_request");

    let err = repo
        .patient_page(&ListRequest::default().search("123456789012345678901234567890"))
        .await
        .unwrap_err();
    assert_eq!(err.category().to_string(), "invalid_request");

    assert_eq!(source.call_count().await, 0);
}

#[tokio::test]
async fn unknown_family_cannot_paginate() {
    let (repo, source) = repository("informix", MemorySource::new());

    let err = repo
        .patient_page(&ListRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, WardError::UnsupportedDatabase { ref family } if family == "informix"));
    assert_eq!(source.call_count().await, 0);
}

#[tokio::test]
async fn data_access_failure_propagates() {
    let source = MemorySource::new().fail_on("COUNT(*)", "connection reset");
    let (repo, _) = repository("postgres", source);

    let err = repo
        .patient_page(&ListRequest::default())
        .await
        .unwrap_err();
    match err {
        WardError::DataAccess { query, .. } => assert_eq!(query, "patient_list_count"),
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Patient details
// =============================================================================

fn details_source() -> MemorySource {
    MemorySource::new()
        .on(
            "FROM internados_detalhe",
            vec![row([
                ("NUM_EPISODIO", SqlValue::Integer(1001)),
                ("NOME", "ANA SOUSA".into()),
                ("SALA", SqlValue::Integer(2)),
                ("CAMA", "B".into()),
                ("DATA_ENTRADA", SqlValue::Date(date!(2024 - 03 - 07))),
                ("HORA_ENTRADA", SqlValue::Null),
                ("DES_SERV", "Medicina".into()),
            ])],
        )
        .on(
            "FROM ainicial_itens",
            vec![
                row([("ITEM", "DIAG"), ("VALOR", "A")]),
                row([("ITEM", "ANTEC"), ("VALOR", "X")]),
                row([("ITEM", "DIAG"), ("VALOR", "A")]),
                row([("ITEM", "DIAG"), ("VALOR", "B")]),
            ],
        )
        .on(
            "FROM telefones",
            vec![row([("TELEFONE", "213000000"), ("TELEMOVEL", "912000000")])],
        )
        .on(
            "FROM medicacao",
            vec![
                row([("FARMACO", "Paracetamol"), ("VIA", "Oral"), ("DOSE", "1g"), ("HORARIO", "8/8h")]),
                row([("FARMACO", SqlValue::Null), ("VIA", SqlValue::Null)]),
            ],
        )
        .on(
            "FROM diarios",
            vec![row([
                ("DIARIO", SqlValue::from("Sem queixas")),
                ("DATA_DIARIO", SqlValue::Date(date!(2024 - 03 - 08))),
                ("HORA_DIARIO", SqlValue::Integer(3661)),
            ])],
        )
}

#[tokio::test]
async fn details_aggregate_all_collections() {
    let (repo, source) = repository("postgres", details_source());

    let details = repo.patient_details("1001", None).await.unwrap();

    assert_eq!(details.episode.patient_name.as_deref(), Some("ANA SOUSA"));
    assert_eq!(details.episode.specialty_name.as_deref(), Some("Medicina"));
    assert_eq!(details.episode.admission_time.as_deref(), Some("00:00"));
    assert_eq!(details.diagnoses, vec!["A", "B"]);
    assert_eq!(details.history, vec!["X"]);
    assert_eq!(details.phones[0].display(), "213000000 / 912000000");
    assert_eq!(details.medications.len(), 1);
    assert_eq!(details.medications[0].schedule.as_deref(), Some("8/8h"));
    assert_eq!(details.diary[0].entry_time.as_deref(), Some("01:01"));
    assert!(details.exams.is_empty());

    // episode, note items and nine child collections
    assert_eq!(source.call_count().await, 11);

    let notes = source.calls_matching("FROM ainicial_itens").await;
    assert_eq!(
        notes[0].params,
        vec![id("1001"), SqlValue::from("ANTEC"), SqlValue::from("DIAG")]
    );

    let episode = source.calls_matching("FROM internados_detalhe").await;
    assert!(episode[0].sql.ends_with("WHERE i.NUM_EPISODIO = $1"));
}

#[tokio::test]
async fn details_invalid_id_is_not_found() {
    let (repo, source) = repository("postgres", details_source());

    let err = repo.patient_details("abc", None).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Invalid patient ID."));
    assert_eq!(source.call_count().await, 0);
}

#[tokio::test]
async fn details_scoped_and_unscoped_not_found_differ() {
    let (repo, source) = repository("postgres", MemorySource::new());

    let err = repo.patient_details("1001", Some("7")).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(
        err.to_string()
            .contains("Patient not found or does not belong to this specialty.")
    );

    let err = repo.patient_details("999999", None).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().ends_with("Patient not found."));

    let calls = source.calls().await;
    assert!(calls[0].sql.ends_with("WHERE i.NUM_EPISODIO = $1 AND i.COD_SERV = $2"));
    assert_eq!(calls[0].params, vec![id("1001"), SqlValue::Integer(7)]);
}

#[tokio::test]
async fn details_missing_child_template_is_configuration_error() {
    let mut document = hospital_document("postgres");
    document["queries"]
        .as_object_mut()
        .unwrap()
        .remove("exams");
    let config = HospitalConfig::new(document).unwrap();
    let repo = WardRepository::from_parts(Arc::new(details_source()), Arc::new(config));

    let err = repo.patient_details("1001", None).await.unwrap_err();
    assert!(err.is_configuration());
}

// =============================================================================
// Lookup and search
// =============================================================================

#[tokio::test]
async fn name_lookup_binds_specialty_first() {
    let source = MemorySource::new().on(
        "FROM internados_nome",
        vec![row([("NUM_EPISODIO", SqlValue::Integer(1001))])],
    );
    let (repo, source) = repository("sqlserver", source);

    let found = repo
        .find_episode_id_by_name("Sousa", Some("7"))
        .await
        .unwrap();
    assert_eq!(found.unwrap().to_string(), "1001");

    let calls = source.calls().await;
    assert!(calls[0].sql.ends_with(
        "WHERE i.COD_SERV = ? AND UPPER(d.NOME) LIKE ? ORDER BY i.DATA_ENTRADA DESC"
    ));
    assert_eq!(
        calls[0].params,
        vec![SqlValue::Integer(7), SqlValue::from("%SOUSA%")]
    );
}

#[tokio::test]
async fn name_lookup_without_match() {
    let (repo, _) = repository("postgres", MemorySource::new());
    assert!(repo.find_episode_id_by_name("Ninguém", None).await.unwrap().is_none());
    assert!(repo.find_episode_id_by_name("  ", None).await.is_err());
}

#[tokio::test]
async fn search_dispatches_by_term_shape() {
    let source = details_source().on(
        "FROM internados_nome",
        vec![row([("NUM_EPISODIO", SqlValue::Integer(1001))])],
    );
    let (repo, source) = repository("postgres", source);

    let by_id = repo.search_patient("1001", None).await.unwrap();
    assert_eq!(by_id.episode.episode_id.unwrap().to_string(), "1001");
    assert!(source.calls_matching("FROM internados_nome").await.is_empty());

    let by_name = repo.search_patient("ana", None).await.unwrap();
    assert_eq!(by_name.episode.patient_name.as_deref(), Some("ANA SOUSA"));
    assert_eq!(source.calls_matching("FROM internados_nome").await.len(), 1);
}

#[tokio::test]
async fn search_never_looks_up_numeric_terms_by_name() {
    let (repo, source) = repository("postgres", details_source());

    for term in [
        "1e30",
        "123456789012345678901234567890",
        "99999999999999999999999999999",
    ] {
        let err = repo.search_patient(term, None).await.unwrap_err();
        assert!(err.is_not_found(), "{term}");
        assert!(err.to_string().contains("Invalid patient ID."), "{term}");
    }
    assert_eq!(source.call_count().await, 0);
}

#[tokio::test]
async fn search_errors() {
    let (repo, _) = repository("postgres", MemorySource::new());

    let err = repo.search_patient("   ", None).await.unwrap_err();
    assert_eq!(err.category().to_string(), "invalid_request");

    let err = repo.search_patient("Ninguém", None).await.unwrap_err();
    assert!(err.is_not_found());
}
