use serde_json::json;
use web_sys::window;
use yew::prelude::*;

use crate::config::FxConfig;
use crate::landing::{self, Enhancements};
use crate::logging::{log_event, LogLevel};
use crate::metrics::PageMetrics;
use crate::skills::SkillLevel;
use crate::styles;

const EASTER_EGG_HINT: &str = "Hover over skills to see proficiency levels!";

struct Skill {
    name: &'static str,
    level: SkillLevel,
}

struct Milestone {
    period: &'static str,
    role: &'static str,
    detail: &'static str,
}

struct Achievement {
    badge: &'static str,
    title: &'static str,
    detail: &'static str,
}

const SKILLS: &[Skill] = &[
    Skill { name: "Test Automation", level: SkillLevel::Expert },
    Skill { name: "Playwright", level: SkillLevel::Expert },
    Skill { name: "API Testing", level: SkillLevel::Advanced },
    Skill { name: "Performance Testing", level: SkillLevel::Advanced },
    Skill { name: "CI/CD Quality Gates", level: SkillLevel::Expert },
    Skill { name: "Rust", level: SkillLevel::Advanced },
    Skill { name: "Exploratory Testing", level: SkillLevel::Expert },
    Skill { name: "Accessibility Audits", level: SkillLevel::Advanced },
    Skill { name: "Chaos Engineering", level: SkillLevel::Other },
];

const MILESTONES: &[Milestone] = &[
    Milestone {
        period: "2024 - now",
        role: "Staff Quality Engineer",
        detail: "Owns release readiness for the payments platform across twelve services.",
    },
    Milestone {
        period: "2021 - 2024",
        role: "Senior SDET",
        detail: "Rebuilt the end-to-end suite; flaky failures dropped from 9% to under 1%.",
    },
    Milestone {
        period: "2018 - 2021",
        role: "QA Engineer",
        detail: "Introduced contract testing between mobile clients and the public API.",
    },
];

const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        badge: "99.9%",
        title: "Release confidence",
        detail: "Deploys shipped without a production rollback in the last two years.",
    },
    Achievement {
        badge: "4x",
        title: "Faster feedback",
        detail: "Pipeline time cut from 40 to 10 minutes with sharded parallel suites.",
    },
    Achievement {
        badge: "0",
        title: "Critical escapes",
        detail: "No severity-one defects reached customers since the quality gate launch.",
    },
];

#[derive(Properties, PartialEq)]
struct SkillTagProps {
    name: AttrValue,
    level: SkillLevel,
}

#[function_component(SkillTag)]
fn skill_tag(props: &SkillTagProps) -> Html {
    html! {
        <a class="skill-tag" href="#" data-level={props.level.as_str()}>
            {props.name.clone()}
        </a>
    }
}

#[derive(Properties, PartialEq)]
struct TimelineEntryProps {
    period: AttrValue,
    role: AttrValue,
    detail: AttrValue,
}

#[function_component(TimelineEntry)]
fn timeline_entry(props: &TimelineEntryProps) -> Html {
    html! {
        <li class="timeline-item">
            <span class="timeline-dot" aria-hidden="true"></span>
            <div class="timeline-copy">
                <p class="muted">{props.period.clone()}</p>
                <h3>{props.role.clone()}</h3>
                <p>{props.detail.clone()}</p>
            </div>
        </li>
    }
}

#[derive(Properties, PartialEq)]
struct AchievementCardProps {
    badge: AttrValue,
    title: AttrValue,
    detail: AttrValue,
}

#[function_component(AchievementCard)]
fn achievement_card(props: &AchievementCardProps) -> Html {
    html! {
        <article class="achievement-card">
            <p class="metric-value">{props.badge.clone()}</p>
            <h3>{props.title.clone()}</h3>
            <p class="muted">{props.detail.clone()}</p>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: FxConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    {
        let config = props.config;
        use_effect_with((), move |_| {
            let enhancements = Enhancements::install(&config);
            move || drop(enhancements)
        });
    }

    html! {
        <>
            <a class="skip-link" href="#content">{"Skip to main content"}</a>
            <div class="page-shell">
                <header class="site-header hero" aria-labelledby="identity-heading">
                    <h1 id="identity-heading">{"Quality, shipped."}</h1>
                    <p class="muted">{"Quality engineering for teams that release every day."}</p>
                    <nav class="hero-links" aria-label="Sections">
                        <a href="#skills">{"Skills"}</a>
                        <a href="#experience">{"Experience"}</a>
                        <a href="#achievements">{"Achievements"}</a>
                        <a href="#contact">{"Contact"}</a>
                    </nav>
                </header>

                <main id="content">
                    <section id="skills" aria-labelledby="skills-heading" class="section-block gradient-section reveal">
                        <h2 id="skills-heading">{"Technical skills"}</h2>
                        <div class="skill-cloud">
                            { for SKILLS.iter().map(|skill| html! {
                                <SkillTag name={skill.name} level={skill.level} />
                            }) }
                        </div>
                    </section>

                    <section id="experience" aria-labelledby="experience-heading" class="section-block reveal">
                        <h2 id="experience-heading">{"Experience"}</h2>
                        <ol class="timeline">
                            { for MILESTONES.iter().map(|milestone| html! {
                                <TimelineEntry
                                    period={milestone.period}
                                    role={milestone.role}
                                    detail={milestone.detail}
                                />
                            }) }
                        </ol>
                    </section>

                    <section id="achievements" aria-labelledby="achievements-heading" class="section-block reveal">
                        <h2 id="achievements-heading">{"Achievements"}</h2>
                        <div class="achievement-grid">
                            { for ACHIEVEMENTS.iter().map(|achievement| html! {
                                <AchievementCard
                                    badge={achievement.badge}
                                    title={achievement.title}
                                    detail={achievement.detail}
                                />
                            }) }
                        </div>
                    </section>

                    <section id="contact" aria-labelledby="contact-heading" class="section-block reveal">
                        <h2 id="contact-heading">{"Contact"}</h2>
                        <div class="glass-card">
                            <p>{"Planning a release train or untangling a flaky suite? Let's talk."}</p>
                            <p>
                                <a class="link" href="mailto:hello@quality.example">{"hello@quality.example"}</a>
                            </p>
                            <p class="muted">{"Shortcuts: c contact, t skills, h top."}</p>
                        </div>
                    </section>
                </main>
            </div>
        </>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    let config = FxConfig::from_document();

    if let Err(err) = styles::inject() {
        log_event(
            &config,
            LogLevel::Debug,
            "effect_failed",
            json!({ "effect": "style_injector", "error": err.to_string() }),
        );
    }

    if let Some(metrics) = PageMetrics::install(&config) {
        landing::keep_for_page(metrics);
    }

    let props = AppProps { config };
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"));
    match root {
        Some(root) => yew::Renderer::<App>::with_root_and_props(root, props).render(),
        None => yew::Renderer::<App>::with_props(props).render(),
    };

    if let Err(err) = landing::expose_namespace(config) {
        log_event(
            &config,
            LogLevel::Debug,
            "effect_failed",
            json!({ "effect": "namespace", "error": err.to_string() }),
        );
    }

    log_event(
        &config,
        LogLevel::Info,
        "landing_initialized",
        json!({ "hint": EASTER_EGG_HINT }),
    );
}
