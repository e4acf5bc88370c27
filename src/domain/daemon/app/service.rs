use std::sync::Arc;

use crate::domain::daemon::engine::EngineHandle;
use crate::domain::daemon::inbound::{
    ConfigurePort, DonePort, PausePort, QueryPort, QueryResponse, ResumePort, StartPort, StopPort,
};
use crate::domain::entity::DurationKind;

#[derive(Debug)]
pub struct StartService {
    engine: Arc<EngineHandle>,
}

impl StartService {
    pub fn new(engine: Arc<EngineHandle>) -> Self {
        Self { engine }
    }
}

#[async_trait::async_trait]
impl StartPort for StartService {
    async fn start(&self) {
        self.engine.start().await
    }
}

#[derive(Debug)]
pub struct StopService {
    engine: Arc<EngineHandle>,
}

impl StopService {
    pub fn new(engine: Arc<EngineHandle>) -> Self {
        Self { engine }
    }
}

#[async_trait::async_trait]
impl StopPort for StopService {
    async fn stop(&self) {
        self.engine.stop().await
    }
}

#[derive(Debug)]
pub struct PauseService {
    engine: Arc<EngineHandle>,
}

impl PauseService {
    pub fn new(engine: Arc<EngineHandle>) -> Self {
        Self { engine }
    }
}

#[async_trait::async_trait]
impl PausePort for PauseService {
    async fn pause(&self) {
        self.engine.pause().await
    }
}

#[derive(Debug)]
pub struct ResumeService {
    engine: Arc<EngineHandle>,
}

impl ResumeService {
    pub fn new(engine: Arc<EngineHandle>) -> Self {
        Self { engine }
    }
}

#[async_trait::async_trait]
impl ResumePort for ResumeService {
    async fn resume(&self) {
        self.engine.resume().await
    }
}

#[derive(Debug)]
pub struct DoneService {
    engine: Arc<EngineHandle>,
}

impl DoneService {
    pub fn new(engine: Arc<EngineHandle>) -> Self {
        Self { engine }
    }
}

#[async_trait::async_trait]
impl DonePort for DoneService {
    async fn mark_done(&self) {
        self.engine.mark_done().await
    }
}

#[derive(Debug)]
pub struct ConfigureService {
    engine: Arc<EngineHandle>,
}

impl ConfigureService {
    pub fn new(engine: Arc<EngineHandle>) -> Self {
        Self { engine }
    }
}

#[async_trait::async_trait]
impl ConfigurePort for ConfigureService {
    async fn configure(&self, kind: DurationKind, minutes: u32) {
        self.engine.configure(kind, minutes).await
    }
}

#[derive(Debug)]
pub struct QueryService {
    engine: Arc<EngineHandle>,
}

impl QueryService {
    pub fn new(engine: Arc<EngineHandle>) -> Self {
        Self { engine }
    }
}

#[async_trait::async_trait]
impl QueryPort for QueryService {
    async fn query(&self) -> QueryResponse {
        let snapshot = self.engine.query().await;

        let mut phase = snapshot.phase.to_string();
        if snapshot.paused {
            phase.push_str(" (paused)");
        }

        QueryResponse {
            phase,
            remaining: snapshot.remaining,
            clock: snapshot.clock,
            completed: snapshot.completed,
        }
    }
}
