//! Client state container.
//!
//! `AppState::update` is the only place state changes. It returns the
//! `Command`s the runtime should execute (fetches, theme persistence); results
//! come back as `Msg::Loaded` and go through `update` like any user action.

pub mod runtime;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::api::types::{
    Difficulty, InsightCategory, InsightGroups, InterviewQuestion, Roadmap, RoadmapGoal, Role,
    StudyTopic,
};
use crate::chat::ChatSession;
use crate::theme::{ThemeMode, ThemePreference};

pub const ROADMAP_DAY_OPTIONS: [u32; 3] = [30, 60, 90];
pub const DEFAULT_ROADMAP_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Roadmap,
    Study,
    Interview,
    Insights,
    Guide,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Home,
        Screen::Roadmap,
        Screen::Study,
        Screen::Interview,
        Screen::Insights,
        Screen::Guide,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Roadmap => "Roadmap",
            Screen::Study => "Study",
            Screen::Interview => "Interview",
            Screen::Insights => "Insights",
            Screen::Guide => "AI Guide",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Roadmap => "roadmap",
            Screen::Study => "study",
            Screen::Interview => "interview",
            Screen::Insights => "insights",
            Screen::Guide => "guide",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" | "/" => Ok(Screen::Home),
            "roadmap" => Ok(Screen::Roadmap),
            "study" => Ok(Screen::Study),
            "interview" => Ok(Screen::Interview),
            "insights" => Ok(Screen::Insights),
            "guide" | "ai-guide" | "ai" => Ok(Screen::Guide),
            other => Err(format!("unknown screen '{other}'")),
        }
    }
}

/// Index into a list of steps, kept inside `[0, len - 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoadmapStepper {
    len: usize,
    current: usize,
}

impl RoadmapStepper {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn can_prev(&self) -> bool {
        self.current > 0
    }

    pub fn can_next(&self) -> bool {
        self.current + 1 < self.len
    }

    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn next(&mut self) {
        if self.can_next() {
            self.current += 1;
        }
    }

    pub fn select(&mut self, index: usize) {
        self.current = index.min(self.len.saturating_sub(1));
    }

    pub fn indicator(&self) -> String {
        if self.is_empty() {
            "Step 0 of 0".to_string()
        } else {
            format!("Step {} of {}", self.current + 1, self.len)
        }
    }
}

// ──────────────────────────────────────────────
// Page state
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct HomePage {
    pub roles: Vec<Role>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InterviewPage {
    pub roles: Vec<Role>,
    pub roles_error: Option<String>,
    pub selected_role: Option<String>,
    pub questions: Vec<InterviewQuestion>,
    pub loading: bool,
    pub error: Option<String>,
    /// Ids of questions whose answers are revealed.
    pub open: BTreeSet<i64>,
    /// `None` shows every difficulty.
    pub filter: Option<Difficulty>,
}

impl InterviewPage {
    pub fn visible_questions(&self) -> Vec<&InterviewQuestion> {
        self.questions
            .iter()
            .filter(|q| self.filter.map_or(true, |f| q.level() == Some(f)))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct RoadmapPage {
    pub goals: Vec<RoadmapGoal>,
    pub goals_error: Option<String>,
    pub selected_goal: Option<String>,
    pub days: u32,
    pub roadmap: Option<Roadmap>,
    pub stepper: RoadmapStepper,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for RoadmapPage {
    fn default() -> Self {
        Self {
            goals: Vec::new(),
            goals_error: None,
            selected_goal: None,
            days: DEFAULT_ROADMAP_DAYS,
            roadmap: None,
            stepper: RoadmapStepper::default(),
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StudyPage {
    pub topics: Vec<StudyTopic>,
    pub active_topic: Option<i64>,
    pub loading: bool,
    pub error: Option<String>,
}

impl StudyPage {
    pub fn active(&self) -> Option<&StudyTopic> {
        self.active_topic
            .and_then(|id| self.topics.iter().find(|t| t.id == id))
    }
}

#[derive(Debug, Clone)]
pub struct InsightsPage {
    pub groups: Option<InsightGroups>,
    pub active_tab: InsightCategory,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for InsightsPage {
    fn default() -> Self {
        Self {
            groups: None,
            active_tab: InsightCategory::Readiness,
            loading: false,
            error: None,
        }
    }
}

// ──────────────────────────────────────────────
// Messages and commands
// ──────────────────────────────────────────────

/// Fetch results. Errors arrive as the API client's message string.
#[derive(Debug, Clone)]
pub enum Loaded {
    Roles(Result<Vec<Role>, String>),
    Questions {
        role: String,
        result: Result<Vec<InterviewQuestion>, String>,
    },
    Goals(Result<Vec<RoadmapGoal>, String>),
    Roadmap {
        goal: String,
        days: u32,
        result: Result<Roadmap, String>,
    },
    Topics(Result<Vec<StudyTopic>, String>),
    Insights(Result<InsightGroups, String>),
}

#[derive(Debug, Clone)]
pub enum Msg {
    Navigate(Screen),
    Refresh,

    ToggleTheme,
    CycleTheme,
    SetTheme(ThemePreference),
    SystemThemeChanged { dark: bool },

    SelectRole(String),
    SetDifficultyFilter(Option<Difficulty>),
    ToggleQuestion(i64),
    ExpandAll,
    CollapseAll,

    SelectGoal(String),
    SetDays(u32),
    StepPrev,
    StepNext,
    StepTo(usize),

    /// Selecting the open topic closes it.
    SelectTopic(i64),
    SelectInsightTab(InsightCategory),

    SubmitChat(String),

    Loaded(Loaded),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchRoles,
    FetchQuestions { role: String },
    FetchGoals,
    FetchRoadmap { goal: String, days: u32 },
    FetchTopics,
    FetchInsights,
    SaveTheme(ThemePreference),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub theme: ThemePreference,
    pub system_dark: bool,
    pub home: HomePage,
    pub interview: InterviewPage,
    pub roadmap: RoadmapPage,
    pub study: StudyPage,
    pub insights: InsightsPage,
    pub chat: ChatSession,
}

impl AppState {
    pub fn new(theme: ThemePreference, system_dark: bool) -> Self {
        Self {
            screen: Screen::Home,
            theme,
            system_dark,
            home: HomePage::default(),
            interview: InterviewPage::default(),
            roadmap: RoadmapPage::default(),
            study: StudyPage::default(),
            insights: InsightsPage::default(),
            chat: ChatSession::new(),
        }
    }

    /// Commands for the initial mount of the home screen.
    pub fn init(&mut self) -> Vec<Command> {
        self.mount(self.screen)
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.resolve(self.system_dark)
    }

    fn mount(&mut self, screen: Screen) -> Vec<Command> {
        match screen {
            Screen::Home | Screen::Interview => vec![Command::FetchRoles],
            Screen::Roadmap => {
                let mut commands = vec![Command::FetchGoals];
                if let Some(goal) = self.roadmap.selected_goal.clone() {
                    self.roadmap.loading = true;
                    commands.push(Command::FetchRoadmap {
                        goal,
                        days: self.roadmap.days,
                    });
                }
                commands
            }
            Screen::Study => {
                self.study.loading = true;
                vec![Command::FetchTopics]
            }
            Screen::Insights => {
                self.insights.loading = true;
                vec![Command::FetchInsights]
            }
            Screen::Guide => Vec::new(),
        }
    }

    fn set_theme(&mut self, theme: ThemePreference) -> Vec<Command> {
        self.theme = theme;
        vec![Command::SaveTheme(theme)]
    }

    fn request_roadmap(&mut self) -> Vec<Command> {
        match self.roadmap.selected_goal.clone() {
            Some(goal) => {
                self.roadmap.loading = true;
                self.roadmap.error = None;
                vec![Command::FetchRoadmap {
                    goal,
                    days: self.roadmap.days,
                }]
            }
            None => Vec::new(),
        }
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Command> {
        match msg {
            Msg::Navigate(screen) => {
                self.screen = screen;
                self.mount(screen)
            }
            Msg::Refresh => self.mount(self.screen),

            Msg::ToggleTheme => self.set_theme(self.theme.toggled(self.system_dark)),
            Msg::CycleTheme => self.set_theme(self.theme.cycled()),
            Msg::SetTheme(theme) => self.set_theme(theme),
            Msg::SystemThemeChanged { dark } => {
                self.system_dark = dark;
                Vec::new()
            }

            Msg::SelectRole(role) => {
                // Same role again only refetches after a failure.
                if self.interview.selected_role.as_deref() == Some(role.as_str())
                    && self.interview.error.is_none()
                {
                    return Vec::new();
                }
                self.interview.selected_role = Some(role.clone());
                self.interview.questions.clear();
                self.interview.open.clear();
                self.interview.loading = true;
                self.interview.error = None;
                vec![Command::FetchQuestions { role }]
            }
            Msg::SetDifficultyFilter(filter) => {
                self.interview.filter = filter;
                Vec::new()
            }
            Msg::ToggleQuestion(id) => {
                if !self.interview.open.remove(&id) {
                    self.interview.open.insert(id);
                }
                Vec::new()
            }
            Msg::ExpandAll => {
                let ids: Vec<i64> = self.interview.visible_questions().iter().map(|q| q.id).collect();
                self.interview.open.extend(ids);
                Vec::new()
            }
            Msg::CollapseAll => {
                self.interview.open.clear();
                Vec::new()
            }

            Msg::SelectGoal(goal) => {
                self.roadmap.selected_goal = Some(goal);
                self.request_roadmap()
            }
            Msg::SetDays(days) => {
                if !ROADMAP_DAY_OPTIONS.contains(&days) || days == self.roadmap.days {
                    return Vec::new();
                }
                self.roadmap.days = days;
                self.request_roadmap()
            }
            Msg::StepPrev => {
                self.roadmap.stepper.prev();
                Vec::new()
            }
            Msg::StepNext => {
                self.roadmap.stepper.next();
                Vec::new()
            }
            Msg::StepTo(index) => {
                self.roadmap.stepper.select(index);
                Vec::new()
            }

            Msg::SelectTopic(id) => {
                self.study.active_topic = if self.study.active_topic == Some(id) {
                    None
                } else {
                    Some(id)
                };
                Vec::new()
            }
            Msg::SelectInsightTab(tab) => {
                self.insights.active_tab = tab;
                Vec::new()
            }

            Msg::SubmitChat(input) => {
                self.chat.submit(&input);
                Vec::new()
            }

            Msg::Loaded(loaded) => {
                self.apply(loaded);
                Vec::new()
            }
        }
    }

    fn apply(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::Roles(result) => match result {
                Ok(roles) => {
                    self.home.roles = roles.clone();
                    self.home.error = None;
                    self.interview.roles = roles;
                    self.interview.roles_error = None;
                }
                Err(e) => {
                    self.home.error = Some(e.clone());
                    self.interview.roles_error = Some(e);
                }
            },
            Loaded::Questions { role, result } => {
                // A reply for a role the user already moved away from is dropped.
                if self.interview.selected_role.as_deref() != Some(role.as_str()) {
                    return;
                }
                self.interview.loading = false;
                match result {
                    Ok(questions) => {
                        self.interview.questions = questions;
                        self.interview.error = None;
                    }
                    Err(e) => {
                        self.interview.questions.clear();
                        self.interview.error = Some(e);
                    }
                }
            }
            Loaded::Goals(result) => match result {
                Ok(goals) => {
                    self.roadmap.goals = goals;
                    self.roadmap.goals_error = None;
                }
                Err(e) => self.roadmap.goals_error = Some(e),
            },
            Loaded::Roadmap { goal, days, result } => {
                if self.roadmap.selected_goal.as_deref() != Some(goal.as_str()) || self.roadmap.days != days {
                    return;
                }
                self.roadmap.loading = false;
                match result {
                    Ok(roadmap) => {
                        self.roadmap.stepper = RoadmapStepper::new(roadmap.milestones.len());
                        self.roadmap.roadmap = Some(roadmap);
                        self.roadmap.error = None;
                    }
                    Err(e) => {
                        self.roadmap.roadmap = None;
                        self.roadmap.stepper = RoadmapStepper::default();
                        self.roadmap.error = Some(e);
                    }
                }
            }
            Loaded::Topics(result) => {
                self.study.loading = false;
                match result {
                    Ok(topics) => {
                        if self.study.active().is_none() {
                            self.study.active_topic = topics.first().map(|t| t.id);
                        }
                        self.study.topics = topics;
                        self.study.error = None;
                    }
                    Err(e) => self.study.error = Some(e),
                }
            }
            Loaded::Insights(result) => {
                self.insights.loading = false;
                match result {
                    Ok(groups) => {
                        self.insights.groups = Some(groups);
                        self.insights.error = None;
                    }
                    Err(e) => self.insights.error = Some(e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::RoadmapMilestone;

    fn question(id: i64, difficulty: &str) -> InterviewQuestion {
        InterviewQuestion {
            id,
            question: format!("Q{id}"),
            answer: String::new(),
            difficulty: difficulty.into(),
            focus: String::new(),
            follow_up: None,
        }
    }

    fn roadmap(goal: &str, days: u32, steps: usize) -> Roadmap {
        Roadmap {
            goal: goal.into(),
            days,
            overview: String::new(),
            milestones: (0..steps)
                .map(|i| RoadmapMilestone {
                    title: format!("M{i}"),
                    duration: String::new(),
                    details: String::new(),
                    outcomes: vec![],
                    resources: vec![],
                    start_day: 0,
                    end_day: 0,
                })
                .collect(),
            weeks: vec![],
        }
    }

    #[test]
    fn test_stepper_clamps_at_both_ends() {
        let mut stepper = RoadmapStepper::new(3);
        assert!(!stepper.can_prev());
        stepper.prev();
        assert_eq!(stepper.current(), 0);

        stepper.next();
        stepper.next();
        stepper.next();
        assert_eq!(stepper.current(), 2);
        assert!(!stepper.can_next());
        assert!(stepper.can_prev());

        stepper.select(99);
        assert_eq!(stepper.current(), 2);
        assert_eq!(stepper.indicator(), "Step 3 of 3");
    }

    #[test]
    fn test_empty_stepper() {
        let mut stepper = RoadmapStepper::new(0);
        stepper.next();
        stepper.select(4);
        assert_eq!(stepper.current(), 0);
        assert!(!stepper.can_prev() && !stepper.can_next());
        assert_eq!(stepper.indicator(), "Step 0 of 0");
    }

    #[test]
    fn test_mount_commands_per_screen() {
        let mut state = AppState::new(ThemePreference::System, false);
        assert_eq!(state.init(), vec![Command::FetchRoles]);
        assert_eq!(state.update(Msg::Navigate(Screen::Interview)), vec![Command::FetchRoles]);
        assert_eq!(state.update(Msg::Navigate(Screen::Roadmap)), vec![Command::FetchGoals]);
        assert_eq!(state.update(Msg::Navigate(Screen::Study)), vec![Command::FetchTopics]);
        assert_eq!(state.update(Msg::Navigate(Screen::Insights)), vec![Command::FetchInsights]);
        assert!(state.update(Msg::Navigate(Screen::Guide)).is_empty());
    }

    #[test]
    fn test_roadmap_mount_refetches_selected_goal() {
        let mut state = AppState::new(ThemePreference::System, false);
        state.roadmap.selected_goal = Some("Cloud Architect".into());
        let commands = state.update(Msg::Navigate(Screen::Roadmap));
        assert_eq!(
            commands,
            vec![
                Command::FetchGoals,
                Command::FetchRoadmap {
                    goal: "Cloud Architect".into(),
                    days: 30
                }
            ]
        );
    }

    #[test]
    fn test_select_role_issues_one_fetch() {
        let mut state = AppState::new(ThemePreference::System, false);
        let commands = state.update(Msg::SelectRole("Web Developer".into()));
        assert_eq!(
            commands,
            vec![Command::FetchQuestions {
                role: "Web Developer".into()
            }]
        );
        assert!(state.interview.loading);
    }

    #[test]
    fn test_stale_questions_are_discarded() {
        let mut state = AppState::new(ThemePreference::System, false);
        state.update(Msg::SelectRole("Web Developer".into()));
        state.update(Msg::SelectRole("Data Scientist".into()));

        state.update(Msg::Loaded(Loaded::Questions {
            role: "Web Developer".into(),
            result: Ok(vec![question(1, "Beginner")]),
        }));
        assert!(state.interview.questions.is_empty());
        assert!(state.interview.loading);

        state.update(Msg::Loaded(Loaded::Questions {
            role: "Data Scientist".into(),
            result: Ok(vec![question(2, "Advanced"), question(3, "Beginner")]),
        }));
        assert_eq!(state.interview.questions.len(), 2);
        assert!(!state.interview.loading);
    }

    #[test]
    fn test_filter_and_expand_all() {
        let mut state = AppState::new(ThemePreference::System, false);
        state.update(Msg::SelectRole("R".into()));
        state.update(Msg::Loaded(Loaded::Questions {
            role: "R".into(),
            result: Ok(vec![question(1, "Beginner"), question(2, "Advanced"), question(3, "Beginner")]),
        }));

        state.update(Msg::SetDifficultyFilter(Some(Difficulty::Beginner)));
        assert_eq!(state.interview.visible_questions().len(), 2);

        state.update(Msg::ExpandAll);
        assert_eq!(state.interview.open, BTreeSet::from([1, 3]));

        state.update(Msg::ToggleQuestion(1));
        assert_eq!(state.interview.open, BTreeSet::from([3]));

        state.update(Msg::CollapseAll);
        assert!(state.interview.open.is_empty());
    }

    #[test]
    fn test_roadmap_loaded_resets_stepper() {
        let mut state = AppState::new(ThemePreference::System, false);
        state.update(Msg::SelectGoal("Python Developer".into()));
        state.update(Msg::Loaded(Loaded::Roadmap {
            goal: "Python Developer".into(),
            days: 30,
            result: Ok(roadmap("Python Developer", 30, 8)),
        }));
        state.update(Msg::StepTo(5));
        assert_eq!(state.roadmap.stepper.current(), 5);

        let commands = state.update(Msg::SetDays(60));
        assert_eq!(
            commands,
            vec![Command::FetchRoadmap {
                goal: "Python Developer".into(),
                days: 60
            }]
        );

        // The 30-day reply is stale once 60 days is selected.
        state.update(Msg::Loaded(Loaded::Roadmap {
            goal: "Python Developer".into(),
            days: 30,
            result: Ok(roadmap("Python Developer", 30, 2)),
        }));
        assert_eq!(state.roadmap.stepper.len(), 8);

        state.update(Msg::Loaded(Loaded::Roadmap {
            goal: "Python Developer".into(),
            days: 60,
            result: Ok(roadmap("Python Developer", 60, 8)),
        }));
        assert_eq!(state.roadmap.stepper.current(), 0);
    }

    #[test]
    fn test_days_outside_options_ignored() {
        let mut state = AppState::new(ThemePreference::System, false);
        state.update(Msg::SelectGoal("Web Developer".into()));
        assert!(state.update(Msg::SetDays(45)).is_empty());
        assert_eq!(state.roadmap.days, 30);
    }

    #[test]
    fn test_roadmap_error_is_kept_for_view() {
        let mut state = AppState::new(ThemePreference::System, false);
        state.update(Msg::SelectGoal("Astronaut".into()));
        state.update(Msg::Loaded(Loaded::Roadmap {
            goal: "Astronaut".into(),
            days: 30,
            result: Err("Roadmap not found for this goal".into()),
        }));
        assert!(state.roadmap.roadmap.is_none());
        assert_eq!(state.roadmap.error.as_deref(), Some("Roadmap not found for this goal"));
        assert!(!state.roadmap.loading);
    }

    #[test]
    fn test_theme_toggle_emits_save() {
        let mut state = AppState::new(ThemePreference::System, true);
        assert_eq!(state.theme_mode(), ThemeMode::Dark);

        let commands = state.update(Msg::ToggleTheme);
        assert_eq!(commands, vec![Command::SaveTheme(ThemePreference::Light)]);
        state.update(Msg::ToggleTheme);
        assert_eq!(state.theme_mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_system_change_only_moves_auto_theme() {
        let mut state = AppState::new(ThemePreference::System, false);
        state.update(Msg::SystemThemeChanged { dark: true });
        assert_eq!(state.theme_mode(), ThemeMode::Dark);

        state.update(Msg::SetTheme(ThemePreference::Light));
        state.update(Msg::SystemThemeChanged { dark: false });
        state.update(Msg::SystemThemeChanged { dark: true });
        assert_eq!(state.theme_mode(), ThemeMode::Light);
    }

    #[test]
    fn test_topic_toggle_and_default_selection() {
        let mut state = AppState::new(ThemePreference::System, false);
        let topic = |id: i64| StudyTopic {
            id,
            title: format!("T{id}"),
            summary: String::new(),
            subhead: String::new(),
            icon: String::new(),
            resources: vec![],
        };
        state.update(Msg::Loaded(Loaded::Topics(Ok(vec![topic(4), topic(9)]))));
        assert_eq!(state.study.active_topic, Some(4));

        state.update(Msg::SelectTopic(9));
        assert_eq!(state.study.active().map(|t| t.id), Some(9));
        state.update(Msg::SelectTopic(9));
        assert!(state.study.active().is_none());
    }

    #[test]
    fn test_screen_parse() {
        assert_eq!("ai-guide".parse::<Screen>().unwrap(), Screen::Guide);
        assert_eq!(" Roadmap ".parse::<Screen>().unwrap(), Screen::Roadmap);
        assert!("settings".parse::<Screen>().is_err());
    }
}
