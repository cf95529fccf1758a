use crate::ai::{build_prompt, recover_questions, GeminiClient};
use crate::logger;
use crate::models::{GenRequest, GenResponse};
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Additional attempts after a retryable JSON-recovery failure.
pub const MAX_RETRIES: u32 = 2;
/// Delay between attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

pub fn spawn_generation_worker(
    gen_tx: Sender<GenResponse>,
    gen_rx: Receiver<GenRequest>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("lawquiz::generation_worker".to_string())
        .spawn(move || loop {
            match gen_rx.recv() {
                Ok(GenRequest::Generate { topic, style }) => {
                    logger::log(&format!(
                        "Worker received generation request: {} ({})",
                        topic.label(),
                        style.label()
                    ));
                    let client = match GeminiClient::from_env() {
                        Ok(client) => client,
                        Err(e) => {
                            let _ = gen_tx.send(GenResponse::Failed {
                                error: format!("Failed to create Gemini client: {}", e),
                            });
                            continue;
                        }
                    };

                    let rt = tokio::runtime::Runtime::new().unwrap();
                    let prompt = build_prompt(topic, style);

                    let mut attempt: u32 = 0;
                    loop {
                        let raw = match rt.block_on(client.generate(&prompt)) {
                            Ok(text) => text,
                            Err(e) => {
                                // Transport and API errors surface immediately.
                                logger::log(&format!("Worker client error: {}", e));
                                let _ = gen_tx.send(GenResponse::Failed {
                                    error: e.to_string(),
                                });
                                break;
                            }
                        };

                        logger::log(&format!("Raw model response: {}", raw));
                        match recover_questions(&raw) {
                            Ok(questions) => {
                                logger::log(&format!(
                                    "Worker recovered {} questions",
                                    questions.len()
                                ));
                                let _ = gen_tx.send(GenResponse::Questions {
                                    topic,
                                    style,
                                    questions,
                                });
                                break;
                            }
                            Err(e) if e.is_retryable() && attempt < MAX_RETRIES => {
                                attempt += 1;
                                logger::log(&format!(
                                    "Recovery failed ({}), retry {}/{}",
                                    e, attempt, MAX_RETRIES
                                ));
                                let _ = gen_tx.send(GenResponse::Retrying {
                                    attempt,
                                    reason: e.to_string(),
                                });
                                thread::sleep(RETRY_DELAY);
                            }
                            Err(e) => {
                                logger::log(&format!("Worker recovery error: {}", e));
                                let _ = gen_tx.send(GenResponse::Failed {
                                    error: e.to_string(),
                                });
                                break;
                            }
                        }
                    }
                }
                Err(_) => {
                    // Channel disconnected, exit worker
                    logger::log("Worker channel disconnected, exiting");
                    break;
                }
            }
        })
        .expect("Failed to spawn generation worker thread")
}
