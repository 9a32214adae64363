use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
    mpsc::{Receiver, Sender},
};
use std::thread;

use bus::{NavCommand, NavEvent};
use core_types::RequestId;
use net::{FetchError, fetch_fragment};

/// Cancel flags for requests still in flight. An entry is dropped when
/// its request is cancelled or its outcome has been delivered, so the
/// registry stays bounded over a long page session.
#[derive(Default)]
struct CancelRegistry {
    flags: Mutex<HashMap<RequestId, Arc<AtomicBool>>>,
}

impl CancelRegistry {
    fn register(&self, request_id: RequestId) -> Arc<AtomicBool> {
        let flag = Arc::new(AtomicBool::new(false));
        if let Ok(mut flags) = self.flags.lock() {
            flags.insert(request_id, flag.clone());
        }
        flag
    }

    fn cancel(&self, request_id: RequestId) {
        let flag = match self.flags.lock() {
            Ok(mut flags) => flags.remove(&request_id),
            Err(_) => None,
        };
        if let Some(flag) = flag {
            flag.store(true, Ordering::Release);
        }
    }

    fn complete(&self, request_id: RequestId) {
        if let Ok(mut flags) = self.flags.lock() {
            flags.remove(&request_id);
        }
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.flags.lock().map(|flags| flags.len()).unwrap_or(0)
    }
}

/// Run the network runtime: execute fetch/cancel commands, report
/// completions as events. A cancelled request surfaces no event at all
/// (the controller has already moved on).
pub fn start_net_runtime(cmd_rx: Receiver<NavCommand>, evt_tx: Sender<NavEvent>) {
    thread::spawn(move || {
        let cancels = Arc::new(CancelRegistry::default());

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                NavCommand::FetchFragment { request_id, url } => {
                    let cancel = cancels.register(request_id);
                    let evt_tx = evt_tx.clone();
                    let cancels = Arc::clone(&cancels);
                    log::debug!("fetching fragment {url} (request {request_id})");

                    fetch_fragment(
                        request_id,
                        url,
                        cancel,
                        Arc::new(move |request_id, outcome| {
                            cancels.complete(request_id);
                            match outcome {
                                Ok(result) => {
                                    let _ = evt_tx.send(NavEvent::FragmentLoaded {
                                        request_id,
                                        html: result.body,
                                    });
                                }
                                Err(FetchError::Cancelled) => {}
                                Err(err) => {
                                    let _ = evt_tx.send(NavEvent::FragmentFailed {
                                        request_id,
                                        error: err.to_string(),
                                    });
                                }
                            }
                        }),
                    );
                }

                NavCommand::CancelFetch { request_id } => cancels.cancel(request_id),

                // DOM-facing commands belong to the host, not this runtime.
                _ => {}
            }
        }
    });
}
