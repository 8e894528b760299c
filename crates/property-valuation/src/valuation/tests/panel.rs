use super::common::*;
use crate::valuation::domain::ValuationResult;
use crate::valuation::form::{FormError, NumericField, ValuationForm};
use crate::valuation::panel::{EstimateStatus, PanelError, PredictionPanel};

#[test]
fn incomplete_form_never_enters_pending() {
    let mut panel = PredictionPanel::new(ValuationForm::blank());

    match panel.begin() {
        Err(PanelError::Form(FormError::Incomplete { fields })) => {
            assert_eq!(fields.len(), 3);
        }
        other => panic!("expected incomplete form, got {other:?}"),
    }
    assert_eq!(panel.status(), EstimateStatus::Idle);
}

#[test]
fn pending_estimate_is_not_treated_as_complete() {
    let mut panel = PredictionPanel::default();
    let request = panel.begin().expect("default form is complete");

    assert!(panel.is_pending());
    assert_eq!(panel.status().result(), None);
    assert!(matches!(panel.begin(), Err(PanelError::AlreadyPending)));

    let estimate = engine().estimate(&request, &mut neutral());
    panel.complete(estimate).expect("estimate was pending");
    assert_eq!(panel.status(), EstimateStatus::Ready(estimate));
    assert_eq!(estimate, ValuationResult(6_600_000));
}

#[test]
fn zero_result_is_distinct_from_no_result() {
    let mut panel = PredictionPanel::default();
    panel
        .form_mut()
        .edit(NumericField::AreaSqm, "0")
        .expect("zero area is valid");

    let request = panel.begin().expect("form complete");
    let estimate = engine().estimate(&request, &mut neutral());
    panel.complete(estimate).expect("estimate was pending");

    assert_eq!(panel.status().result(), Some(ValuationResult(0)));
    assert_ne!(panel.status(), EstimateStatus::Idle);
}

#[test]
fn completing_without_a_pending_estimate_fails() {
    let mut panel = PredictionPanel::default();
    assert!(matches!(
        panel.complete(ValuationResult(10)),
        Err(PanelError::NotPending)
    ));
    assert_eq!(panel.status(), EstimateStatus::Idle);
}

#[test]
fn status_serializes_with_tag() {
    let ready = serde_json::to_value(EstimateStatus::Ready(ValuationResult(42))).expect("encodes");
    assert_eq!(ready["status"], "ready");
    assert_eq!(ready["estimate"], 42);

    let idle = serde_json::to_value(EstimateStatus::Idle).expect("encodes");
    assert_eq!(idle["status"], "idle");
}
