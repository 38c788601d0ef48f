use std::{path::PathBuf, time::Duration};

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use notify_debouncer_full::{
    new_debouncer,
    notify::{Error as NotifyError, RecursiveMode, Watcher},
    DebouncedEvent,
};
use tracing::{debug, error, info};

use crate::state::RefreshBroadcaster;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(tx): State<RefreshBroadcaster>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, tx))
}

async fn handle_socket(mut socket: WebSocket, tx: RefreshBroadcaster) {
    let mut rx = tx.subscribe();

    // One signal per connection; the browser reconnects after it reloads.
    if rx.recv().await.is_ok() {
        if socket
            .send(Message::Text("reload".to_string().into()))
            .await
            .is_err()
        {
            debug!("client disconnected before reload message could be sent");
        }
    }
}

fn is_relevant(event: &DebouncedEvent) -> bool {
    let relevant_kind =
        event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove();
    if !relevant_kind {
        return false;
    }

    // Editor droppings (Emacs lockfiles, ~ backups) would otherwise make
    // every save reload twice.
    let is_temp_file = event.event.paths.iter().any(|path| {
        path.file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |s| s.starts_with(".#") || s.ends_with('~'))
    });

    !is_temp_file
}

/// Watch the content directory and tell connected browsers to refresh.
/// Posts and templates are read from disk per request, so there is no
/// server-side state to rebuild here.
pub fn start_content_watcher(tx: RefreshBroadcaster, content_dir: PathBuf) {
    info!("starting content watcher for live reload");
    tokio::spawn(async move {
        let (watcher_tx, mut watcher_rx) = tokio::sync::mpsc::channel(1);

        let mut debouncer = match new_debouncer(
            Duration::from_millis(200),
            None,
            move |res: Result<Vec<DebouncedEvent>, Vec<NotifyError>>| match res {
                Ok(events) => {
                    if events.iter().any(is_relevant) {
                        debug!(
                            "content change: {:?}",
                            events
                                .iter()
                                .flat_map(|e| &e.event.paths)
                                .map(|p| p.display())
                                .collect::<Vec<_>>()
                        );
                        if let Err(e) = watcher_tx.blocking_send(()) {
                            error!("failed to queue watcher event: {}", e);
                        }
                    }
                }
                Err(errors) => {
                    for e in errors {
                        error!("watcher error: {}", e);
                    }
                }
            },
        ) {
            Ok(debouncer) => debouncer,
            Err(e) => {
                error!("failed to create content watcher: {}", e);
                return;
            }
        };

        if let Err(e) = debouncer
            .watcher()
            .watch(&content_dir, RecursiveMode::Recursive)
        {
            error!("failed to watch {}: {}", content_dir.display(), e);
            return;
        }

        while watcher_rx.recv().await.is_some() {
            info!("content changed, telling clients to reload");
            if let Err(e) = tx.send(()) {
                debug!("no live reload clients connected: {}", e);
            }
        }
    });
}
