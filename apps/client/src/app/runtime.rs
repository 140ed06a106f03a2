use std::collections::VecDeque;

use tracing::{debug, warn};

use super::{AppState, Command, Loaded, Msg};
use crate::api::CareerApi;
use crate::theme::ThemeStore;

/// Drives `AppState` against a live API and a theme store.
///
/// Commands run one at a time in the order `update` emitted them; every result
/// is fed back through `update` before `dispatch` returns.
pub struct Runtime<A, S> {
    api: A,
    store: S,
    state: AppState,
}

impl<A: CareerApi, S: ThemeStore> Runtime<A, S> {
    pub fn new(api: A, store: S, system_dark: bool) -> Self {
        let theme = match store.load() {
            Ok(saved) => saved.unwrap_or_default(),
            Err(e) => {
                warn!("Theme preference unavailable, using system: {e:#}");
                Default::default()
            }
        };
        Self {
            api,
            store,
            state: AppState::new(theme, system_dark),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Runs the initial mount.
    pub async fn start(&mut self) {
        let commands = self.state.init();
        self.run(commands).await;
    }

    pub async fn dispatch(&mut self, msg: Msg) {
        let commands = self.state.update(msg);
        self.run(commands).await;
    }

    async fn run(&mut self, commands: Vec<Command>) {
        let mut queue: VecDeque<Command> = commands.into();
        while let Some(command) = queue.pop_front() {
            if let Some(msg) = self.execute(command).await {
                queue.extend(self.state.update(msg));
            }
        }
    }

    async fn execute(&self, command: Command) -> Option<Msg> {
        debug!(?command, "Executing");
        let loaded = match command {
            Command::FetchRoles => Loaded::Roles(self.api.roles().await.map_err(report)),
            Command::FetchQuestions { role } => {
                let result = self.api.interview_questions(&role).await.map_err(report);
                Loaded::Questions { role, result }
            }
            Command::FetchGoals => Loaded::Goals(self.api.roadmap_goals().await.map_err(report)),
            Command::FetchRoadmap { goal, days } => {
                let result = self.api.roadmap(&goal, days).await.map_err(report);
                Loaded::Roadmap { goal, days, result }
            }
            Command::FetchTopics => Loaded::Topics(self.api.study_topics().await.map_err(report)),
            Command::FetchInsights => Loaded::Insights(self.api.insights().await.map_err(report)),
            Command::SaveTheme(preference) => {
                if let Err(e) = self.store.save(preference) {
                    warn!("Failed to persist theme preference: {e:#}");
                }
                return None;
            }
        };
        Some(Msg::Loaded(loaded))
    }
}

fn report(e: crate::api::ApiError) -> String {
    warn!("API request failed: {e}");
    e.to_string()
}
