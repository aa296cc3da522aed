//! Client-held prospects through the list pipeline, plus record export.

use crate::common::fixtures::prospect_draft;
use backoffice_core::export::flatten_record;
use backoffice_core::filter::ProspectFilterUpdate;
use backoffice_core::models::{LegalRepresentative, Prospect, ProspectStatus};
use backoffice_core::prospects::ProspectBook;
use backoffice_core::{Choice, ListView};

fn book() -> ProspectBook {
    let mut book = ProspectBook::new();
    book.create(prospect_draft("Acme", Some("MI"), ProspectStatus::New)).unwrap();
    book.create(prospect_draft("Borea", Some("RM"), ProspectStatus::Won)).unwrap();
    book.create(prospect_draft("Cigno", None, ProspectStatus::Lost)).unwrap();
    book.create(prospect_draft("Delta", Some("MI"), ProspectStatus::Won)).unwrap();
    book
}

#[test]
fn numbers_are_sequential() {
    let book = book();
    let numbers: Vec<&str> = book.all().iter().map(|p| p.number.as_str()).collect();
    assert_eq!(numbers, vec!["PR-0001", "PR-0002", "PR-0003", "PR-0004"]);
}

#[test]
fn invalid_draft_is_not_added() {
    let mut book = book();
    let mut draft = prospect_draft("", None, ProspectStatus::New);
    draft.legal_representatives = vec![LegalRepresentative::default(); 5];
    let errors = book.create(draft).unwrap_err();
    assert!(errors.for_field("company.name").is_some());
    assert!(errors.for_field("legal_representatives").is_some());
    assert!(errors.for_field("legal_representatives[0].surname").is_some());
    assert_eq!(book.len(), 4);
}

#[test]
fn conversion_rate_and_province_filter() {
    let book = book();
    let mut view: ListView<Prospect> = ListView::with_records(book.all().to_vec(), 10).unwrap();
    let snapshot = view.refresh();
    assert_eq!(snapshot.stats.by_status.count(ProspectStatus::Won), 2);
    assert_eq!(snapshot.stats.conversion_rate, 66.7);

    view.update_filter(ProspectFilterUpdate::Province(Choice::Only("MI".to_string())));
    let snapshot = view.refresh();
    assert_eq!(snapshot.filtered_count, 2);

    // Cigno has no province: excluded by any concrete province, included by All.
    view.update_filter(ProspectFilterUpdate::Province(Choice::All));
    view.update_filter(ProspectFilterUpdate::Search("cigno".to_string()));
    assert_eq!(view.refresh().filtered_count, 1);
}

#[test]
fn status_change_and_removal() {
    let mut book = book();
    let id = book.all()[0].id;
    assert!(book.set_status(id, ProspectStatus::Contacted));
    assert_eq!(book.get(id).unwrap().status, ProspectStatus::Contacted);

    let mut draft = prospect_draft("Acme Holding", Some("TO"), ProspectStatus::Negotiation);
    draft.extra_info = Some("call on Monday".to_string());
    assert!(book.update(id, draft).unwrap());
    assert_eq!(book.get(id).unwrap().company.name, "Acme Holding");

    let removed = book.remove(id).unwrap();
    assert_eq!(removed.number, "PR-0001");
    assert!(book.get(id).is_none());
    assert!(!book.set_status(id, ProspectStatus::Won));
}

#[test]
fn export_flattens_nested_blocks() {
    let book = book();
    let rows = flatten_record(&book.all()[0]).unwrap();
    let value = |k: &str| rows.iter().find(|r| r.key == k).map(|r| r.value.clone());
    assert_eq!(value("company.name").as_deref(), Some("Acme"));
    assert_eq!(value("company.province").as_deref(), Some("MI"));
    assert_eq!(value("legal_representatives[0].surname").as_deref(), Some("RepAcme"));
    assert_eq!(value("documents.signed_contract").as_deref(), Some("false"));
    assert_eq!(value("status").as_deref(), Some("NEW"));
}
