//! Runs board effects on the tokio runtime and hands completions back to the
//! UI thread.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::backend::Backend;
use crate::state::{BoardEffect, BoardEvent};

type Notify = Arc<dyn Fn() + Send + Sync>;

pub struct BoardDriver<B: Backend> {
    handle: Handle,
    backend: Arc<B>,
    tx: mpsc::UnboundedSender<BoardEvent>,
    rx: mpsc::UnboundedReceiver<BoardEvent>,
    in_flight: Arc<AtomicUsize>,
    notify: Option<Notify>,
}

impl<B: Backend> BoardDriver<B> {
    pub fn new(handle: Handle, backend: Arc<B>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            handle,
            backend,
            tx,
            rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
            notify: None,
        }
    }

    /// Call `notify` after every completion (e.g. to request a repaint)
    pub fn with_notify(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.notify = Some(Arc::new(notify));
        self
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Requests started and not yet delivered
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Start one task per effect
    pub fn dispatch(&self, effects: Vec<BoardEffect>) {
        for effect in effects {
            self.spawn(effect);
        }
    }

    fn spawn(&self, effect: BoardEffect) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let in_flight = Arc::clone(&self.in_flight);
        let notify = self.notify.clone();

        in_flight.fetch_add(1, Ordering::SeqCst);
        self.handle.spawn(async move {
            let event = match effect {
                BoardEffect::FetchDetail(request) => {
                    let result = backend
                        .fetch_detail(&request.place_id)
                        .await
                        .map_err(|e| e.to_string());
                    BoardEvent::DetailLoaded { request, result }
                }
                BoardEffect::Submit {
                    generation,
                    request,
                } => {
                    let result = backend.submit(&request).await.map_err(|e| e.to_string());
                    BoardEvent::Submitted { generation, result }
                }
                BoardEffect::Navigate { origin, location } => {
                    let result = backend
                        .fetch_board(&location)
                        .await
                        .map_err(|e| e.to_string());
                    BoardEvent::Navigated {
                        origin,
                        location,
                        result,
                    }
                }
            };

            if tx.send(event).is_err() {
                tracing::debug!("Driver dropped before completion");
            }
            if let Some(notify) = notify {
                notify();
            }
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }

    /// Completed events, without blocking
    pub fn poll(&mut self) -> Vec<BoardEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Wait for the next completion
    pub async fn next_event(&mut self) -> Option<BoardEvent> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{board_json, sample_detail, ScriptedBackend};
    use crate::state::{DetailRequest, MarkerId};
    use shared::SubmitRequest;

    #[tokio::test]
    async fn test_detail_roundtrip() {
        let backend = Arc::new(ScriptedBackend::new().with_detail("pa", sample_detail()));
        let mut driver = BoardDriver::new(Handle::current(), Arc::clone(&backend));
        let request = DetailRequest {
            generation: 1,
            seq: 1,
            marker: MarkerId(0),
            place_id: "pa".into(),
        };
        driver.dispatch(vec![BoardEffect::FetchDetail(request.clone())]);

        match driver.next_event().await {
            Some(BoardEvent::DetailLoaded { request: r, result }) => {
                assert_eq!(r, request);
                assert_eq!(result.unwrap().name.as_deref(), Some("Sample Place"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(backend.detail_calls(), vec!["pa".to_string()]);
    }

    #[tokio::test]
    async fn test_errors_become_strings() {
        let backend = Arc::new(ScriptedBackend::new().fail_submit(500, "boom"));
        let mut driver = BoardDriver::new(Handle::current(), backend);
        driver.dispatch(vec![BoardEffect::Submit {
            generation: 7,
            request: SubmitRequest::default(),
        }]);

        match driver.next_event().await {
            Some(BoardEvent::Submitted { generation, result }) => {
                assert_eq!(generation, 7);
                assert_eq!(result.unwrap_err(), "API error: 500 - boom");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_navigate_and_notify() {
        let backend = Arc::new(ScriptedBackend::new().with_board("search/2", &board_json(vec![])));
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut driver = BoardDriver::new(Handle::current(), backend)
            .with_notify(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        driver.dispatch(vec![BoardEffect::Navigate {
            origin: Some(3),
            location: "search/2".into(),
        }]);

        let Some(BoardEvent::Navigated { origin, result, .. }) = driver.next_event().await else {
            panic!("expected navigation");
        };
        assert_eq!(origin, Some(3));
        assert!(result.is_ok());
        while driver.in_flight() > 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(driver.poll().is_empty());
    }
}
