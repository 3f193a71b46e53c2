//! Response reconciliation: slice replacement, modal routing, ordering.

mod common;

use common::*;
use serde_json::json;
use sheetlink_client::StateSink;
use sheetlink_contract::{AnalysisData, ApiError, ErrorDescriptor, ModalState, SheetData, UserProfile};
use sheetlink_protocol::{ResponseBody, SuccessBody};
use std::sync::atomic::Ordering;

fn body_with(sheets: bool, analysis: bool, profile: bool) -> SuccessBody {
    SuccessBody {
        sheet_data_array: sheets.then(|| vec![SheetData::new(json!({"dfName": "df1"}))]),
        analysis_data: analysis.then(|| AnalysisData::new(json!({"analysisName": "a1"}))),
        user_profile: profile.then(|| UserProfile::new(json!({"userEmail": "ada@example.com"}))),
        result: json!(null),
    }
}

#[tokio::test]
async fn each_slice_updates_independently() {
    // All eight present/absent combinations: a slice setter runs exactly
    // when its slice is on the response.
    for sheets in [false, true] {
        for analysis in [false, true] {
            for profile in [false, true] {
                let transport = ScriptedTransport::new(move |envelope| {
                    reply(success_with(envelope, body_with(sheets, analysis, profile)))
                });
                let sink = CountingSink::new();
                let client = client(transport, sink.clone());

                client.undo().await.expect("update succeeds");

                assert_eq!(
                    sink.sheet_updates.load(Ordering::SeqCst),
                    usize::from(sheets),
                    "sheets={sheets} analysis={analysis} profile={profile}"
                );
                assert_eq!(
                    sink.analysis_updates.load(Ordering::SeqCst),
                    usize::from(analysis),
                    "sheets={sheets} analysis={analysis} profile={profile}"
                );
                assert_eq!(
                    sink.profile_updates.load(Ordering::SeqCst),
                    usize::from(profile),
                    "sheets={sheets} analysis={analysis} profile={profile}"
                );
            }
        }
    }
}

#[tokio::test]
async fn slices_are_visible_when_the_call_returns() {
    let transport = ScriptedTransport::new(|envelope| {
        reply(success_with(envelope, body_with(true, true, true)))
    });
    let sink = CountingSink::new();
    let client = client(transport, sink.clone());

    client.undo().await.unwrap();

    // No extra yield: updates are applied before `send` resolves.
    assert_eq!(sink.store.sheet_data()[0].df_name(), Some("df1"));
    assert_eq!(sink.store.analysis_data().analysis_name(), Some("a1"));
    assert_eq!(
        sink.store.user_profile().user_email(),
        Some("ada@example.com")
    );
}

#[tokio::test]
async fn repeated_responses_replace_slices_wholesale() {
    let transport = ScriptedTransport::new(|envelope| {
        let name = if envelope.operation == "undo" { "first" } else { "second" };
        reply(success_with(
            envelope,
            SuccessBody {
                sheet_data_array: Some(vec![
                    SheetData::new(json!({"dfName": name})),
                ]),
                ..Default::default()
            },
        ))
    });
    let sink = CountingSink::new();
    let client = client(transport, sink.clone());

    client.undo().await.unwrap();
    assert_eq!(sink.store.sheet_data()[0].df_name(), Some("first"));
    client.redo().await.unwrap();
    let sheets = sink.store.sheet_data();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].df_name(), Some("second"));
}

#[tokio::test]
async fn modal_error_swaps_the_modal_slot() {
    let transport = ScriptedTransport::new(|envelope| {
        reply(Ok(ResponseBody::Error {
            id: Some(envelope.id.clone()),
            descriptor: ErrorDescriptor::modal(
                "value_error",
                "Invalid formula",
                "Check the column references and try again.",
                None,
            ),
        }))
    });
    let sink = CountingSink::new();
    let client = client(transport, sink.clone());

    // A previously open modal is discarded, not stacked.
    sink.store
        .update_ui(&mut |ui| ui.open_error_modal(ErrorDescriptor::connection()));

    let err = client.undo().await.err().expect("edit fails");
    assert!(err.is_modal());

    match sink.ui_state().modal {
        ModalState::Error { error } => {
            assert_eq!(error.short_error, "Invalid formula");
            assert_eq!(error.kind.as_deref(), Some("value_error"));
        }
        ModalState::None => panic!("modal should be open"),
    }

    // Errors never touch the state slices.
    assert_eq!(sink.sheet_updates.load(Ordering::SeqCst), 0);
    assert_eq!(sink.analysis_updates.load(Ordering::SeqCst), 0);
    assert_eq!(sink.profile_updates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn in_place_error_leaves_the_modal_alone() {
    let transport = ScriptedTransport::new(|envelope| {
        reply(Ok(ResponseBody::Error {
            id: Some(envelope.id.clone()),
            descriptor: ErrorDescriptor::in_place_edit(),
        }))
    });
    let sink = CountingSink::new();
    let client = client(transport, sink.clone());

    let err = client.undo().await.err().expect("edit fails");
    assert!(matches!(err, ApiError::Backend(_)));
    assert!(!err.is_modal());
    assert_eq!(sink.ui_state().modal, ModalState::None);
    assert_eq!(sink.sheet_updates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn error_result_still_resolves_the_caller() {
    // A modal error interrupts the user *and* resolves the await, so the
    // caller can run local cleanup.
    let transport = ScriptedTransport::new(|envelope| {
        reply(Ok(ResponseBody::Error {
            id: Some(envelope.id.clone()),
            descriptor: ErrorDescriptor::modal("error", "Header", "Fix it.", None),
        }))
    });
    let sink = CountingSink::new();
    let client = client(transport, sink.clone());

    let err = client.undo().await.err().expect("resolved with error");
    let descriptor = err.descriptor().expect("descriptor");
    assert_eq!(descriptor.error, "Fix it.");
    assert!(matches!(sink.ui_state().modal, ModalState::Error { .. }));
}
