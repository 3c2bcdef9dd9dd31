use crate::hap::value::Value;
use std::sync::Arc;

pub type DidSetListener = Arc<dyn Fn(&Value, bool) + Send + Sync>;
pub type DidTouchListener = Arc<dyn Fn(&Value) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Observer registry. Emission works on a snapshot, so listeners added or
/// removed while an event is being delivered take effect from the next one.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    did_set: Vec<(ListenerId, DidSetListener)>,
    did_touch: Vec<(ListenerId, DidTouchListener)>,
}

impl Listeners {
    pub fn add_did_set(&mut self, listener: DidSetListener) -> ListenerId {
        let id = self.next_id();
        self.did_set.push((id, listener));
        id
    }

    pub fn add_did_touch(&mut self, listener: DidTouchListener) -> ListenerId {
        let id = self.next_id();
        self.did_touch.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.did_set.len() + self.did_touch.len();
        self.did_set.retain(|(listener_id, _)| *listener_id != id);
        self.did_touch.retain(|(listener_id, _)| *listener_id != id);
        before != self.did_set.len() + self.did_touch.len()
    }

    pub fn clear(&mut self) {
        self.did_set.clear();
        self.did_touch.clear();
    }

    pub fn did_set(&self) -> Vec<DidSetListener> {
        self.did_set.iter().map(|(_, l)| l.clone()).collect()
    }

    pub fn did_touch(&self) -> Vec<DidTouchListener> {
        self.did_touch.iter().map(|(_, l)| l.clone()).collect()
    }

    fn next_id(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }
}
