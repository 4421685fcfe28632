//! Scripted channel and destination doubles for sink processing tests.

use async_trait::async_trait;
use connectors::{
    channel::EventChannel,
    destination::EventDestination,
    error::{ChannelError, DbError},
};
use model::records::{event::Event, insert::InsertRow};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Shared operation log, used to assert cross-resource resolution order.
pub type OpLog = Arc<Mutex<Vec<&'static str>>>;

pub fn op_log() -> OpLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn ops(log: &OpLog) -> Vec<&'static str> {
    log.lock().unwrap().clone()
}

pub fn event(headers: &[(&str, &str)], body: &str) -> Event {
    let headers: HashMap<String, String> = headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Event::new(headers, body.as_bytes().to_vec())
}

#[derive(Debug, Default)]
pub struct ChannelState {
    pub pending: VecDeque<Event>,
    pub taken: Vec<Event>,
    pub begins: usize,
    pub commits: usize,
    pub rollbacks: usize,
    pub closes: usize,
    pub fail_take: bool,
    pub fail_commit: bool,
    pub fail_close: bool,
}

/// In-memory transactional channel: events taken inside a rolled-back
/// transaction are put back in order and redelivered.
pub struct MockChannel {
    state: Arc<Mutex<ChannelState>>,
    ops: OpLog,
}

impl MockChannel {
    pub fn new(events: Vec<Event>, ops: OpLog) -> (Self, Arc<Mutex<ChannelState>>) {
        let state = Arc::new(Mutex::new(ChannelState {
            pending: events.into(),
            ..ChannelState::default()
        }));
        (
            MockChannel {
                state: state.clone(),
                ops,
            },
            state,
        )
    }
}

#[async_trait]
impl EventChannel for MockChannel {
    async fn begin(&mut self) -> Result<(), ChannelError> {
        self.ops.lock().unwrap().push("source.begin");
        self.state.lock().unwrap().begins += 1;
        Ok(())
    }

    async fn take(&mut self) -> Result<Option<Event>, ChannelError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_take {
            return Err(ChannelError::Take("scripted take failure".into()));
        }
        let next = state.pending.pop_front();
        if let Some(event) = next.clone() {
            state.taken.push(event);
        }
        Ok(next)
    }

    async fn commit(&mut self) -> Result<(), ChannelError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_commit {
            return Err(ChannelError::Transaction("scripted commit failure".into()));
        }
        self.ops.lock().unwrap().push("source.commit");
        state.taken.clear();
        state.commits += 1;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), ChannelError> {
        self.ops.lock().unwrap().push("source.rollback");
        let mut state = self.state.lock().unwrap();
        let taken: Vec<Event> = state.taken.drain(..).collect();
        for event in taken.into_iter().rev() {
            state.pending.push_front(event);
        }
        state.rollbacks += 1;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ChannelError> {
        self.ops.lock().unwrap().push("source.close");
        let mut state = self.state.lock().unwrap();
        state.closes += 1;
        if state.fail_close {
            return Err(ChannelError::Closed("scripted close failure".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct DestinationState {
    /// Rows staged by `execute_batch` but not yet committed.
    pub staged: Vec<InsertRow>,
    /// Rows made durable by `commit`.
    pub written: Vec<InsertRow>,
    pub execute_calls: usize,
    pub commits: usize,
    pub rollbacks: usize,
    pub fail_execute: bool,
    pub fail_commit: bool,
}

/// In-memory destination: rows become durable only on commit.
pub struct MockDestination {
    state: Arc<Mutex<DestinationState>>,
    ops: OpLog,
}

impl MockDestination {
    pub fn new(ops: OpLog) -> (Self, Arc<Mutex<DestinationState>>) {
        let state = Arc::new(Mutex::new(DestinationState::default()));
        (
            MockDestination {
                state: state.clone(),
                ops,
            },
            state,
        )
    }
}

#[async_trait]
impl EventDestination for MockDestination {
    async fn execute_batch(&mut self, rows: &[InsertRow]) -> Result<(), DbError> {
        self.ops.lock().unwrap().push("dest.execute");
        let mut state = self.state.lock().unwrap();
        state.execute_calls += 1;
        if state.fail_execute {
            return Err(DbError::Write("scripted execute failure".into()));
        }
        state.staged.extend(rows.iter().cloned());
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), DbError> {
        self.ops.lock().unwrap().push("dest.commit");
        let mut state = self.state.lock().unwrap();
        if state.fail_commit {
            return Err(DbError::Write("scripted commit failure".into()));
        }
        state.commits += 1;
        let staged: Vec<InsertRow> = state.staged.drain(..).collect();
        state.written.extend(staged);
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DbError> {
        self.ops.lock().unwrap().push("dest.rollback");
        let mut state = self.state.lock().unwrap();
        state.rollbacks += 1;
        state.staged.clear();
        Ok(())
    }
}
