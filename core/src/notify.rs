use std::collections::HashMap;

use crossbeam_channel::{Receiver, Sender};
use log::debug;
use uuid::Uuid;

/// Sent once after every edit batch.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FileChanged {
  pub batch_size: usize,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct ListenerId(Uuid);

impl ListenerId {
  pub fn new() -> ListenerId {
    ListenerId(Uuid::new_v4())
  }
}

impl Default for ListenerId {
  fn default() -> Self {
    ListenerId::new()
  }
}

#[derive(Default)]
pub struct ChangeNotifier {
  listeners: HashMap<ListenerId, Sender<FileChanged>>,
}

impl ChangeNotifier {
  pub fn new() -> ChangeNotifier {
    ChangeNotifier::default()
  }

  pub fn subscribe(&mut self) -> (ListenerId, Receiver<FileChanged>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let id = ListenerId::new();
    self.listeners.insert(id, tx);
    (id, rx)
  }

  pub fn unsubscribe(&mut self, id: &ListenerId) -> bool {
    self.listeners.remove(id).is_some()
  }

  pub fn num_listeners(&self) -> usize {
    self.listeners.len()
  }

  /// Broadcasts to every listener, forgetting the ones whose receiver is gone
  pub fn notify(&mut self, event: FileChanged) {
    let before = self.listeners.len();
    self
      .listeners
      .retain(|_id, tx| tx.send(event).is_ok());
    let dropped = before - self.listeners.len();
    if dropped > 0 {
      debug!("Dropped {} disconnected listeners", dropped);
    }
  }
}
