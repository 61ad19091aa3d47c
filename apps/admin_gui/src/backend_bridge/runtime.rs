//! Backend worker: a dedicated thread with a tokio runtime that owns the
//! `AdminClient` and performs exactly one request per queued command.

use std::thread;

use client_core::{forms::SubmitOutcome, AdminClient, ClientError};
use crossbeam_channel::{Receiver, Sender};
use shared::protocol::{LoginRequest, RegisterRequest};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{ChallengeOp, UiError, UiErrorContext, UiEvent};
use crate::ui::app::StartupConfig;

/// Auth failures surface the server's own message when the body carries one.
fn auth_error_text(err: ClientError) -> String {
    match err {
        ClientError::Rejected { body, .. } if !body.trim().is_empty() => body,
        other => other.to_string(),
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, startup: StartupConfig) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let mut client = match AdminClient::new(&startup.server_url) {
                Ok(client) => client,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!(
                            "backend worker startup failure: invalid server url '{}': {err}",
                            startup.server_url
                        ),
                    )));
                    tracing::error!(
                        server_url = %startup.server_url,
                        "invalid server url for backend worker: {err}"
                    );
                    return;
                }
            };
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Login {
                        server_url,
                        username,
                        password,
                    } => {
                        tracing::info!("backend: login");
                        // The sign-in screen may point at a different server;
                        // rebind the client before authenticating against it.
                        match AdminClient::new(&server_url) {
                            Ok(rebound) => client = rebound,
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Login,
                                    format!("invalid server url '{server_url}': {err}"),
                                )));
                                continue;
                            }
                        }
                        match client.login(&LoginRequest { username, password }).await {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::LoginOk);
                            }
                            Err(err) => {
                                tracing::error!("backend: login failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Login,
                                    auth_error_text(err),
                                )));
                            }
                        }
                    }
                    BackendCommand::Register {
                        username,
                        email,
                        password,
                    } => {
                        tracing::info!("backend: register");
                        match client
                            .register(&RegisterRequest {
                                username,
                                email,
                                password,
                            })
                            .await
                        {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::RegisterOk);
                            }
                            Err(err) => {
                                tracing::error!("backend: register failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Login,
                                    auth_error_text(err),
                                )));
                            }
                        }
                    }
                    BackendCommand::CreateChallenge { request } => {
                        tracing::info!("backend: create_challenge");
                        let result = client.create_challenge(&request).await;
                        if let Err(err) = &result {
                            tracing::error!("backend: create_challenge failed: {err}");
                        }
                        let _ = ui_tx.try_send(UiEvent::ChallengeSubmitted {
                            op: ChallengeOp::Create,
                            outcome: SubmitOutcome::from_result(&result),
                        });
                    }
                    BackendCommand::FetchChallenge { challenge_id } => {
                        tracing::info!(challenge_id = challenge_id.0, "backend: fetch_challenge");
                        match client.fetch_challenge(challenge_id).await {
                            Ok(detail) => {
                                let _ = ui_tx.try_send(UiEvent::ChallengeLoaded {
                                    challenge_id,
                                    detail,
                                });
                            }
                            Err(err) => {
                                tracing::error!(
                                    challenge_id = challenge_id.0,
                                    "backend: fetch_challenge failed: {err}"
                                );
                                let _ = ui_tx.try_send(UiEvent::ChallengeLoadFailed {
                                    challenge_id,
                                    reason: err.to_string(),
                                });
                            }
                        }
                    }
                    BackendCommand::ApproveChallenge {
                        challenge_id,
                        request,
                    } => {
                        tracing::info!(challenge_id = challenge_id.0, "backend: approve_challenge");
                        let result = client.approve_challenge(challenge_id, &request).await;
                        if let Err(err) = &result {
                            tracing::error!(
                                challenge_id = challenge_id.0,
                                "backend: approve_challenge failed: {err}"
                            );
                        }
                        let _ = ui_tx.try_send(UiEvent::ChallengeSubmitted {
                            op: ChallengeOp::Approve,
                            outcome: SubmitOutcome::from_result(&result),
                        });
                    }
                    BackendCommand::DeleteChallenge { challenge_id } => {
                        tracing::info!(challenge_id = challenge_id.0, "backend: delete_challenge");
                        let result = client.delete_challenge(challenge_id).await;
                        if let Err(err) = &result {
                            tracing::error!(
                                challenge_id = challenge_id.0,
                                "backend: delete_challenge failed: {err}"
                            );
                        }
                        let _ = ui_tx.try_send(UiEvent::ChallengeSubmitted {
                            op: ChallengeOp::Delete,
                            outcome: SubmitOutcome::from_result(&result),
                        });
                    }
                }
            }
        });
    });
}
