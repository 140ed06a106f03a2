//! Page views: `&AppState` in, `Node` out.

use crate::api::types::{InsightCategory, InterviewQuestion, RoadmapMilestone, StudyTopic};
use crate::app::{AppState, Screen, ROADMAP_DAY_OPTIONS};
use crate::chat::Speaker;

use super::Node;

pub const TAGLINE: &str = "Navigate Your Goals";
pub const FOOTER: &str = "© 2026 NAVIQ. Navigate your career with clarity.";

pub const QUESTIONS_ERROR: &str = "Failed to load questions. Please try again.";
pub const ROADMAP_ERROR: &str = "Could not create the roadmap. Please retry in a moment.";
pub const ROLES_ERROR: &str = "Failed to load roles. Please try again.";
pub const GOALS_ERROR: &str = "Failed to load goals. Please try again.";

const FEATURES: [(&str, &str); 5] = [
    (
        "Learning Roadmaps",
        "Personalized paths that adapt to your pace and goals. Step-by-step guidance from beginner to expert.",
    ),
    (
        "Study Resources",
        "Curated materials, documentation, and hands-on projects to accelerate your learning journey.",
    ),
    (
        "Interview Prep",
        "Real-world questions with detailed answers. Practice with confidence and ace your interviews.",
    ),
    (
        "Career Insights",
        "Data-driven analytics on your progress, market trends, and personalized recommendations.",
    ),
    (
        "AI Career Guide",
        "Intelligent assistant that understands your goals and provides contextual guidance.",
    ),
];

pub fn view(state: &AppState) -> Node {
    let body = match state.screen {
        Screen::Home => home(state),
        Screen::Roadmap => roadmap(state),
        Screen::Study => study(state),
        Screen::Interview => interview(state),
        Screen::Insights => insights(state),
        Screen::Guide => guide(state),
    };
    Node::Column(vec![header(state), body, footer()])
}

fn header(state: &AppState) -> Node {
    let active = Screen::ALL.iter().position(|s| *s == state.screen);
    Node::Column(vec![
        Node::Row(vec![
            Node::text(format!("NAVIQ · {TAGLINE}")),
            Node::muted(format!(
                "Theme: {} ({})",
                state.theme.label(),
                state.theme_mode().as_str()
            )),
        ]),
        Node::Tabs {
            items: Screen::ALL.iter().map(|s| s.label().to_string()).collect(),
            active,
        },
        Node::Divider,
    ])
}

fn footer() -> Node {
    Node::Column(vec![Node::Divider, Node::muted(FOOTER)])
}

/// Page title block shared by every screen but home.
fn intro(eyebrow: &str, title: &str, blurb: &str) -> Node {
    Node::Column(vec![
        Node::muted(eyebrow),
        Node::heading(title),
        Node::text(blurb),
        Node::Blank,
    ])
}

fn placeholder(title: &str, detail: &str) -> Node {
    Node::Column(vec![Node::subheading(title), Node::muted(detail)])
}

fn error_line(message: &str) -> Node {
    Node::text(format!("! {message}"))
}

// ──────────────────────────────────────────────
// Home
// ──────────────────────────────────────────────

fn home(state: &AppState) -> Node {
    let mut nodes = vec![
        Node::muted("Powered by AI & Your Ambitions"),
        Node::heading("Navigate Your Career With Clarity"),
        Node::text(
            "Personalized roadmaps, curated resources, and an AI guide that keeps you focused \
             on what matters. Transform your potential into achievement.",
        ),
        Node::Row(vec![Node::button("Start Your Journey", true)]),
        Node::Blank,
        Node::subheading("Everything You Need to Succeed"),
    ];
    nodes.extend(FEATURES.iter().map(|(title, description)| Node::Card {
        title: title.to_string(),
        badge: None,
        body: vec![Node::text(*description)],
    }));

    nodes.push(Node::Blank);
    nodes.push(Node::subheading("Choose Your Path"));
    nodes.push(Node::muted("Explore career paths tailored to your interests and goals"));
    if let Some(error) = &state.home.error {
        nodes.push(error_line(error));
    } else {
        nodes.push(Node::Bullets(
            state
                .home
                .roles
                .iter()
                .map(|r| format!("{}: {}", r.name, r.description))
                .collect(),
        ));
    }

    nodes.push(Node::Blank);
    nodes.push(Node::subheading("Ready to Transform Your Career?"));
    nodes.push(Node::text(
        "Join thousands of professionals who are navigating their careers with clarity and confidence.",
    ));
    nodes.push(Node::Row(vec![Node::button("Get Started Now", true)]));
    Node::Column(nodes)
}

// ──────────────────────────────────────────────
// Roadmap
// ──────────────────────────────────────────────

fn roadmap(state: &AppState) -> Node {
    let page = &state.roadmap;
    let mut nodes = vec![intro(
        "Learning Roadmap",
        "Your Path to Mastery",
        "Select a career goal and timeline to generate your personalized learning roadmap",
    )];

    let goal = page.selected_goal.as_deref().unwrap_or("Select a goal...");
    nodes.push(Node::text(format!("Career Goal: {goal}")));
    if page.goals_error.is_some() {
        nodes.push(error_line(GOALS_ERROR));
    } else if !page.goals.is_empty() {
        nodes.push(Node::Tags(page.goals.iter().map(|g| g.name.clone()).collect()));
    }
    nodes.push(Node::Row(vec![
        Node::text("Timeline:"),
        Node::Tabs {
            items: ROADMAP_DAY_OPTIONS.iter().map(|d| format!("{d} days")).collect(),
            active: ROADMAP_DAY_OPTIONS.iter().position(|d| *d == page.days),
        },
    ]));
    nodes.push(Node::Blank);

    if page.loading {
        nodes.push(Node::muted("Generating your roadmap..."));
    } else if page.error.is_some() {
        nodes.push(error_line(ROADMAP_ERROR));
    } else if let Some(roadmap) = &page.roadmap {
        nodes.push(Node::text(roadmap.overview.clone()));
        nodes.push(Node::Blank);
        for (i, milestone) in roadmap.milestones.iter().enumerate() {
            nodes.push(milestone_card(i, milestone, i == page.stepper.current()));
        }
        nodes.push(Node::Row(vec![
            Node::button("Previous", page.stepper.can_prev()),
            Node::muted(page.stepper.indicator()),
            Node::button("Next", page.stepper.can_next()),
        ]));
        if !roadmap.weeks.is_empty() {
            nodes.push(Node::Blank);
            nodes.push(Node::subheading("Weekly Plan"));
            nodes.push(Node::Bullets(
                roadmap
                    .weeks
                    .iter()
                    .map(|w| format!("{}: {}", w.title, w.summary))
                    .collect(),
            ));
        }
    } else {
        nodes.push(placeholder(
            "Select a Goal to Begin",
            "Choose your career goal above to generate a personalized roadmap",
        ));
    }
    Node::Column(nodes)
}

/// The active milestone is expanded; the rest show title and schedule only.
fn milestone_card(index: usize, milestone: &RoadmapMilestone, active: bool) -> Node {
    let marker = if active { ">" } else { " " };
    let mut body = Vec::new();
    if active {
        body.push(Node::text(milestone.details.clone()));
        if !milestone.outcomes.is_empty() {
            body.push(Node::subheading("Learning Outcomes"));
            body.push(Node::Bullets(milestone.outcomes.clone()));
        }
        if !milestone.resources.is_empty() {
            body.push(Node::subheading("Resources"));
            body.push(Node::Tags(milestone.resources.clone()));
        }
    }
    Node::Card {
        title: format!("{marker} {}. {}", index + 1, milestone.title),
        badge: Some(milestone.duration.clone()),
        body,
    }
}

// ──────────────────────────────────────────────
// Study
// ──────────────────────────────────────────────

fn study(state: &AppState) -> Node {
    let page = &state.study;
    let mut nodes = vec![intro(
        "Study Resources",
        "Deep Dive Knowledge",
        "Curated resources organized by topic to accelerate your learning journey",
    )];

    if page.loading {
        nodes.push(Node::muted("Loading topics..."));
    } else if let Some(error) = &page.error {
        nodes.push(error_line(error));
    } else if page.topics.is_empty() {
        nodes.push(placeholder(
            "No Study Topics Yet",
            "Check back later for curated learning resources",
        ));
    } else {
        for topic in &page.topics {
            nodes.push(topic_card(topic, page.active_topic == Some(topic.id)));
        }
    }
    Node::Column(nodes)
}

fn topic_card(topic: &StudyTopic, open: bool) -> Node {
    let mut body = vec![Node::muted(topic.subhead.clone()), Node::text(topic.summary.clone())];
    if open {
        body.push(Node::subheading("Resources"));
        body.push(Node::Bullets(
            topic
                .resources
                .iter()
                .map(|r| {
                    let mut line = format!("[{}] {}", r.kind, r.title);
                    if !r.detail.is_empty() {
                        line.push_str(&format!(": {}", r.detail));
                    }
                    if !r.url.is_empty() {
                        line.push_str(&format!(" <{}>", r.url));
                    }
                    line
                })
                .collect(),
        ));
    } else {
        body.push(Node::muted(format!(
            "{} resources • Click to expand",
            topic.resources.len()
        )));
    }
    Node::Card {
        title: topic.title.clone(),
        badge: (!topic.icon.is_empty()).then(|| topic.icon.clone()),
        body,
    }
}

// ──────────────────────────────────────────────
// Interview
// ──────────────────────────────────────────────

fn interview(state: &AppState) -> Node {
    let page = &state.interview;
    let mut nodes = vec![intro(
        "Interview Prep",
        "Ace Your Interview",
        "Practice with real-world questions and detailed answers from industry experts",
    )];

    nodes.push(Node::subheading("Select a Role"));
    if page.roles_error.is_some() {
        nodes.push(error_line(ROLES_ERROR));
    }
    nodes.push(Node::Tabs {
        items: page.roles.iter().map(|r| r.name.clone()).collect(),
        active: page
            .selected_role
            .as_deref()
            .and_then(|sel| page.roles.iter().position(|r| r.name == sel)),
    });
    nodes.push(Node::Blank);

    if page.selected_role.is_none() {
        nodes.push(placeholder("Select a Role", "Choose a role above to see interview questions"));
    } else if page.loading {
        nodes.push(Node::muted("Loading questions..."));
    } else if page.error.is_some() {
        nodes.push(error_line(QUESTIONS_ERROR));
    } else if page.questions.is_empty() {
        let role = page.selected_role.as_deref().unwrap_or_default();
        nodes.push(placeholder(
            "No Questions Yet",
            &format!("Interview questions for {role} are coming soon"),
        ));
    } else {
        let filter = page.filter.map_or("All", |d| d.as_str());
        nodes.push(Node::Row(vec![
            Node::text(format!("Difficulty: {filter}")),
            Node::button("Expand All", true),
            Node::button("Collapse All", !page.open.is_empty()),
        ]));
        for question in page.visible_questions() {
            nodes.push(question_card(question, page.open.contains(&question.id)));
        }
    }
    Node::Column(nodes)
}

fn question_card(question: &InterviewQuestion, open: bool) -> Node {
    let mut body = Vec::new();
    if !question.focus.is_empty() {
        body.push(Node::muted(format!("Focus: {}", question.focus)));
    }
    if open {
        body.push(Node::text(question.answer.clone()));
        if let Some(follow_up) = &question.follow_up {
            body.push(Node::subheading("Follow-up Question"));
            body.push(Node::text(follow_up.clone()));
        }
    }
    Node::Card {
        title: question.question.clone(),
        badge: Some(question.difficulty.clone()),
        body,
    }
}

// ──────────────────────────────────────────────
// Insights
// ──────────────────────────────────────────────

fn insights(state: &AppState) -> Node {
    let page = &state.insights;
    let mut nodes = vec![intro(
        "Career Analytics",
        "Your Career Insights",
        "Data-driven analytics to track your progress and understand market trends",
    )];

    nodes.push(Node::Tabs {
        items: InsightCategory::ALL.iter().map(|c| c.title().to_string()).collect(),
        active: InsightCategory::ALL.iter().position(|c| *c == page.active_tab),
    });
    nodes.push(Node::Blank);

    let cards = page.groups.as_ref().map_or(&[][..], |g| g.get(page.active_tab));
    if page.loading {
        nodes.push(Node::muted("Loading insights..."));
    } else if let Some(error) = &page.error {
        nodes.push(error_line(error));
    } else if cards.is_empty() {
        nodes.push(placeholder(
            "No Insights Available",
            "Start your learning journey to generate personalized insights",
        ));
    } else {
        nodes.extend(cards.iter().map(|insight| Node::Card {
            title: insight.label.clone(),
            badge: Some(insight.value.clone()),
            body: vec![Node::muted(insight.meta.clone())],
        }));
    }
    Node::Column(nodes)
}

// ──────────────────────────────────────────────
// AI guide
// ──────────────────────────────────────────────

fn guide(state: &AppState) -> Node {
    let mut nodes = vec![intro(
        "AI Career Guide",
        "Your Personal Career Assistant",
        "Ask me anything about your career journey...",
    )];
    for message in state.chat.messages() {
        let who = match message.speaker {
            Speaker::Assistant => "NAVIQ",
            Speaker::User => "You",
        };
        nodes.push(Node::subheading(who));
        nodes.push(Node::text(message.text.clone()));
        nodes.push(Node::Blank);
    }
    nodes.push(Node::muted("Quick prompts"));
    nodes.push(Node::Bullets(
        state.chat.chips().iter().map(|c| c.to_string()).collect(),
    ));
    Node::Column(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Insight, InsightGroups, Roadmap};
    use crate::app::{Loaded, Msg};
    use crate::theme::ThemePreference;
    use crate::view::render_text;

    fn state() -> AppState {
        AppState::new(ThemePreference::System, false)
    }

    fn question(id: i64) -> InterviewQuestion {
        InterviewQuestion {
            id,
            question: format!("Question {id}"),
            answer: format!("Answer {id}"),
            difficulty: "Intermediate".into(),
            focus: "Concurrency".into(),
            follow_up: Some("Why?".into()),
        }
    }

    fn milestone(title: &str) -> RoadmapMilestone {
        RoadmapMilestone {
            title: title.into(),
            duration: "Days 1-7".into(),
            details: "Details".into(),
            outcomes: vec!["Outcome".into()],
            resources: vec!["Docs".into()],
            start_day: 1,
            end_day: 7,
        }
    }

    #[test]
    fn test_interview_renders_one_card_per_question() {
        for n in [0usize, 1, 4] {
            let mut s = state();
            s.update(Msg::Navigate(Screen::Interview));
            s.update(Msg::SelectRole("Python Developer".into()));
            s.update(Msg::Loaded(Loaded::Questions {
                role: "Python Developer".into(),
                result: Ok((0..n as i64).map(question).collect()),
            }));
            assert_eq!(view(&s).count_cards(), n);
        }
    }

    #[test]
    fn test_answer_hidden_until_opened() {
        let mut s = state();
        s.update(Msg::Navigate(Screen::Interview));
        s.update(Msg::SelectRole("R".into()));
        s.update(Msg::Loaded(Loaded::Questions {
            role: "R".into(),
            result: Ok(vec![question(1)]),
        }));
        assert!(!render_text(&view(&s), 80).contains("Answer 1"));

        s.update(Msg::ToggleQuestion(1));
        let out = render_text(&view(&s), 80);
        assert!(out.contains("Answer 1"));
        assert!(out.contains("Follow-up Question"));
    }

    #[test]
    fn test_questions_error_copy() {
        let mut s = state();
        s.update(Msg::Navigate(Screen::Interview));
        s.update(Msg::SelectRole("R".into()));
        s.update(Msg::Loaded(Loaded::Questions {
            role: "R".into(),
            result: Err("Network error".into()),
        }));
        assert!(render_text(&view(&s), 80).contains(QUESTIONS_ERROR));
    }

    #[test]
    fn test_roadmap_stepper_buttons_disable_at_bounds() {
        let mut s = state();
        s.update(Msg::Navigate(Screen::Roadmap));
        s.update(Msg::SelectGoal("Cloud Architect".into()));
        s.update(Msg::Loaded(Loaded::Roadmap {
            goal: "Cloud Architect".into(),
            days: 30,
            result: Ok(Roadmap {
                goal: "Cloud Architect".into(),
                days: 30,
                overview: "Overview".into(),
                milestones: vec![milestone("One"), milestone("Two"), milestone("Three")],
                weeks: vec![],
            }),
        }));

        let out = render_text(&view(&s), 100);
        assert!(out.contains("( Previous )"));
        assert!(out.contains("[ Next ]"));
        assert!(out.contains("Step 1 of 3"));
        assert_eq!(view(&s).count_cards(), 3);

        s.update(Msg::StepTo(2));
        let out = render_text(&view(&s), 100);
        assert!(out.contains("[ Previous ]"));
        assert!(out.contains("( Next )"));
        assert!(out.contains("Step 3 of 3"));
    }

    #[test]
    fn test_roadmap_placeholder_and_error() {
        let mut s = state();
        s.update(Msg::Navigate(Screen::Roadmap));
        assert!(render_text(&view(&s), 80).contains("Select a Goal to Begin"));

        s.update(Msg::SelectGoal("Astronaut".into()));
        assert!(render_text(&view(&s), 80).contains("Generating your roadmap..."));
        s.update(Msg::Loaded(Loaded::Roadmap {
            goal: "Astronaut".into(),
            days: 30,
            result: Err("Roadmap not found for this goal".into()),
        }));
        assert!(render_text(&view(&s), 80).contains(ROADMAP_ERROR));
    }

    #[test]
    fn test_roles_failure_shows_on_interview() {
        let mut s = state();
        s.update(Msg::Navigate(Screen::Interview));
        s.update(Msg::Loaded(Loaded::Roles(Err("HTTP error! status: 500".into()))));
        let out = render_text(&view(&s), 80);
        assert!(out.contains(ROLES_ERROR));

        s.update(Msg::Loaded(Loaded::Roles(Ok(vec![]))));
        assert!(!render_text(&view(&s), 80).contains(ROLES_ERROR));
    }

    #[test]
    fn test_goals_failure_is_not_a_roadmap_failure() {
        let mut s = state();
        s.update(Msg::Navigate(Screen::Roadmap));
        s.update(Msg::Loaded(Loaded::Goals(Err("HTTP error! status: 503".into()))));
        let out = render_text(&view(&s), 80);
        assert!(out.contains(GOALS_ERROR));
        assert!(!out.contains(ROADMAP_ERROR));
        assert!(out.contains("Select a Goal to Begin"));
    }

    #[test]
    fn test_insights_tab_shows_only_its_cards() {
        let mut s = state();
        let card = |id, label: &str| Insight {
            id,
            label: label.into(),
            value: "1".into(),
            meta: String::new(),
        };
        s.update(Msg::Navigate(Screen::Insights));
        s.update(Msg::Loaded(Loaded::Insights(Ok(InsightGroups {
            readiness: vec![card(1, "Mock interviews")],
            velocity: vec![],
            market: vec![card(2, "Openings"), card(3, "Comp window")],
        }))));
        assert_eq!(view(&s).count_cards(), 1);

        s.update(Msg::SelectInsightTab(InsightCategory::Market));
        assert_eq!(view(&s).count_cards(), 2);

        s.update(Msg::SelectInsightTab(InsightCategory::Velocity));
        assert!(render_text(&view(&s), 80).contains("No Insights Available"));
    }

    #[test]
    fn test_header_and_footer_on_every_screen() {
        let mut s = state();
        for screen in Screen::ALL {
            s.update(Msg::Navigate(screen));
            let out = render_text(&view(&s), 120);
            assert!(out.starts_with("NAVIQ · Navigate Your Goals"));
            assert!(out.contains(&format!("[{}]", screen.label())));
            assert!(out.ends_with(FOOTER));
        }
    }

    #[test]
    fn test_guide_shows_transcript() {
        let mut s = state();
        s.update(Msg::Navigate(Screen::Guide));
        s.update(Msg::SubmitChat("Prep me for tomorrow".into()));
        let out = render_text(&view(&s), 100);
        assert!(out.contains("Prep me for tomorrow"));
        assert!(out.contains("quick prep plan"));
    }
}
