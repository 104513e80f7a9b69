//! Line-oriented terminal frontend. Each loop iteration renders the current
//! screen, reads one answer, and feeds it to the session driver.

use std::fmt::Write as _;
use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};

use crate::domains::{
    BuilderAction, BuilderResult, Budget, Expertise, Idea, IdeaMode, Profile,
};
use crate::error::{IdeaForgeError, Result};
use crate::session::{Screen, SessionDriver, SessionEvent};

const BANNER: &str = "Turn your skills into a business. Answer four questions and get \
six ideas with a viability score, or bring your own idea and have it validated.";

pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, out: W) -> Self {
        Self {
            lines: reader.lines(),
            out,
        }
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(format!("{text}\n").as_bytes())
            .await
            .map_err(|e| IdeaForgeError::Runtime(e.to_string()))?;
        self.out
            .flush()
            .await
            .map_err(|e| IdeaForgeError::Runtime(e.to_string()))
    }

    /// `None` once input is exhausted.
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.out
            .write_all(format!("{prompt} > ").as_bytes())
            .await
            .map_err(|e| IdeaForgeError::Runtime(e.to_string()))?;
        self.out
            .flush()
            .await
            .map_err(|e| IdeaForgeError::Runtime(e.to_string()))?;
        let line = self
            .lines
            .next_line()
            .await
            .map_err(|e| IdeaForgeError::Runtime(e.to_string()))?;
        Ok(line.map(|line| line.trim().to_string()))
    }

    /// Drives the session until the user quits or input ends.
    pub async fn run(&mut self, driver: &mut SessionDriver) -> Result<()> {
        loop {
            let keep_going = match driver.session().screen() {
                Screen::Hero => self.hero(driver).await?,
                Screen::ProfileGenerate | Screen::ProfileValidate => self.profile(driver).await?,
                Screen::Validator => self.validator(driver).await?,
                Screen::Results => self.results(driver).await?,
                Screen::Builder => self.builder(driver).await?,
                Screen::Loading => {
                    return Err(IdeaForgeError::Runtime(
                        "generation finished without leaving the loading screen".to_string(),
                    ))
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    async fn dispatch(&mut self, driver: &mut SessionDriver, event: SessionEvent) -> Result<()> {
        if let Err(err) = driver.dispatch(event).await {
            self.report(driver, &err).await?;
        }
        Ok(())
    }

    /// Prints the session's own failure text when it recorded one.
    async fn report(&mut self, driver: &SessionDriver, err: &IdeaForgeError) -> Result<()> {
        let message = driver
            .session()
            .last_error()
            .map(str::to_string)
            .unwrap_or_else(|| err.public_message());
        self.say(&format!("! {message}")).await
    }

    async fn hero(&mut self, driver: &mut SessionDriver) -> Result<bool> {
        self.say(BANNER).await?;
        let Some(answer) = self
            .ask("[g] generate ideas  [v] validate my idea  [q] quit")
            .await?
        else {
            return Ok(false);
        };
        match answer.to_ascii_lowercase().as_str() {
            "g" => self.dispatch(driver, SessionEvent::ChooseGenerate).await?,
            "v" => self.dispatch(driver, SessionEvent::ChooseValidate).await?,
            "q" => return Ok(false),
            _ => self.say("Pick g, v or q.").await?,
        }
        Ok(true)
    }

    async fn choose<T>(&mut self, title: &str, options: &[(T, String)]) -> Result<Option<Choice<T>>>
    where
        T: Copy + FromStr,
    {
        self.say(title).await?;
        for (index, (_, label)) in options.iter().enumerate() {
            self.say(&format!("  {}) {label}", index + 1)).await?;
        }
        loop {
            let Some(answer) = self.ask("choice, or [b] back").await? else {
                return Ok(None);
            };
            if answer.eq_ignore_ascii_case("b") {
                return Ok(Some(Choice::Back));
            }
            let picked = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|n| options.get(n))
                .map(|(value, _)| *value)
                .or_else(|| T::from_str(&answer).ok());
            match picked {
                Some(value) => return Ok(Some(Choice::Picked(value))),
                None => self.say("Not one of the options.").await?,
            }
        }
    }

    async fn profile(&mut self, driver: &mut SessionDriver) -> Result<bool> {
        self.say("Tell us about yourself.").await?;

        let expertise: Vec<_> = Expertise::ALL
            .iter()
            .map(|e| (*e, e.label().to_string()))
            .collect();
        let expertise = match self.choose("Your business experience:", &expertise).await? {
            None => return Ok(false),
            Some(Choice::Back) => {
                self.dispatch(driver, SessionEvent::Back).await?;
                return Ok(true);
            }
            Some(Choice::Picked(value)) => value,
        };
        let Some(interests) = self.ask("Your interests and passions").await? else {
            return Ok(false);
        };
        let budgets: Vec<_> = Budget::ALL
            .iter()
            .map(|b| (*b, format!("{} ({})", b.as_str(), b.label())))
            .collect();
        let budget = match self.choose("Starting budget:", &budgets).await? {
            None => return Ok(false),
            Some(Choice::Back) => {
                self.dispatch(driver, SessionEvent::Back).await?;
                return Ok(true);
            }
            Some(Choice::Picked(value)) => value,
        };
        let Some(skills) = self.ask("Skills you already have (optional)").await? else {
            return Ok(false);
        };

        let profile = Profile::new(expertise, interests, budget, skills);
        if driver.session().mode() == IdeaMode::Generate && profile.validate().is_ok() {
            self.say(IdeaMode::Generate.loading_message()).await?;
        }
        self.dispatch(driver, SessionEvent::SubmitProfile(profile))
            .await?;
        Ok(true)
    }

    async fn validator(&mut self, driver: &mut SessionDriver) -> Result<bool> {
        let Some(idea) = self
            .ask("Describe the business idea to validate, or [b] back")
            .await?
        else {
            return Ok(false);
        };
        if idea.eq_ignore_ascii_case("b") {
            self.dispatch(driver, SessionEvent::Back).await?;
            return Ok(true);
        }
        if !idea.trim().is_empty() {
            self.say(IdeaMode::Validate.loading_message()).await?;
        }
        self.dispatch(driver, SessionEvent::SubmitIdea(idea)).await?;
        Ok(true)
    }

    async fn results(&mut self, driver: &mut SessionDriver) -> Result<bool> {
        let listing = render_ideas(driver.session().ideas());
        self.say(&listing).await?;
        let regenerate = match driver.session().mode() {
            IdeaMode::Generate => "[r] regenerate  [b] edit profile",
            IdeaMode::Validate => "[r] re-run  [b] validate another idea",
        };
        let Some(answer) = self
            .ask(&format!("idea number to build it  {regenerate}  [q] quit"))
            .await?
        else {
            return Ok(false);
        };
        match answer.to_ascii_lowercase().as_str() {
            "q" => return Ok(false),
            "b" => self.dispatch(driver, SessionEvent::Back).await?,
            "r" => {
                self.say(driver.session().mode().loading_message()).await?;
                self.dispatch(driver, SessionEvent::Regenerate).await?;
            }
            id => {
                self.dispatch(driver, SessionEvent::SelectIdea(id.to_string()))
                    .await?
            }
        }
        Ok(true)
    }

    async fn builder(&mut self, driver: &mut SessionDriver) -> Result<bool> {
        let Some(idea) = driver.session().selected_idea().cloned() else {
            self.dispatch(driver, SessionEvent::Back).await?;
            return Ok(true);
        };
        self.say(&render_idea(&idea)).await?;
        for (index, action) in BuilderAction::ALL.iter().enumerate() {
            let session = driver.session();
            let mark = if session.is_builder_pending(*action) {
                "~"
            } else if session.builder_results().is_done(*action) {
                "x"
            } else {
                " "
            };
            self.say(&format!("  {}) [{mark}] {}", index + 1, action.label()))
                .await?;
        }
        let Some(answer) = self
            .ask("action number to run, v<number> to view, [b] back, [q] quit")
            .await?
        else {
            return Ok(false);
        };
        let answer = answer.to_ascii_lowercase();
        match answer.as_str() {
            "q" => return Ok(false),
            "b" => self.dispatch(driver, SessionEvent::Back).await?,
            other => {
                let (view, index) = match other.strip_prefix('v') {
                    Some(rest) => (true, rest),
                    None => (false, other),
                };
                let Some(action) = index
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|n| BuilderAction::ALL.get(n).copied())
                else {
                    self.say("Not one of the actions.").await?;
                    return Ok(true);
                };
                if view {
                    match driver.session().builder_results().get(action) {
                        Some(result) => self.say(&render_result(&result)).await?,
                        None => self.say(&format!("{} has not run yet.", action.label())).await?,
                    }
                } else {
                    self.say(&format!("Running {}...", action.label())).await?;
                    match driver.run_builder(action).await {
                        Ok(result) => self.say(&render_result(&result)).await?,
                        Err(err) => self.report(driver, &err).await?,
                    }
                }
            }
        }
        Ok(true)
    }
}

enum Choice<T> {
    Picked(T),
    Back,
}

/// Runs the console over the process's stdin and stdout.
pub async fn run_stdio(driver: &mut SessionDriver) -> Result<()> {
    let mut console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    console.run(driver).await
}

pub fn render_ideas(ideas: &[Idea]) -> String {
    let mut out = String::new();
    for idea in ideas {
        let _ = writeln!(
            out,
            "{}. {} [{}/100, {} urgency]\n   {}",
            idea.id,
            idea.name,
            idea.viability_score,
            idea.urgency_level.as_str(),
            idea.description
        );
    }
    out
}

pub fn render_idea(idea: &Idea) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (viability {}/100)", idea.name, idea.viability_score);
    let _ = writeln!(out, "{}", idea.description);
    let _ = writeln!(out, "Problem: {}", idea.problem);
    let _ = writeln!(
        out,
        "Profit {} | Launch {} | Cost {} | Experience {}",
        idea.profit_potential, idea.time_to_launch, idea.startup_cost, idea.experience_needed
    );
    if !idea.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", idea.tags.join(", "));
    }
    out
}

fn bullets(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "{title}:");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

pub fn render_result(result: &BuilderResult) -> String {
    let mut out = String::new();
    match result {
        BuilderResult::BusinessPlan(plan) => {
            let _ = writeln!(out, "{}: {}", plan.business_name, plan.tagline);
            let _ = writeln!(out, "{}", plan.elevator_pitch);
            let _ = writeln!(out, "Audience: {}", plan.target_audience);
            let _ = writeln!(out, "Revenue: {}", plan.revenue_model);
            let _ = writeln!(out, "Edge: {}", plan.competitive_advantage);
            let brand = &plan.brand_identity;
            let _ = writeln!(
                out,
                "Brand: {} / {} / colors {} / fonts {}",
                brand.tone,
                brand.personality,
                brand.colors.join(", "),
                brand.fonts.join(", ")
            );
            for week in &plan.launch_timeline {
                let _ = writeln!(out, "{} - {}: {}", week.week, week.title, week.tasks.join("; "));
            }
            bullets(&mut out, "Channels", &plan.marketing_strategy.channels);
            bullets(&mut out, "Content ideas", &plan.marketing_strategy.content_ideas);
            bullets(&mut out, "Launch tactics", &plan.marketing_strategy.launch_tactics);
            let _ = writeln!(out, "Budget: {}", plan.marketing_strategy.budget_allocation);
            let money = &plan.financial_projection;
            let _ = writeln!(
                out,
                "Revenue month 1/3/6/12: {} / {} / {} / {} (break even {})",
                money.month1, money.month3, money.month6, money.month12, money.break_even_timeline
            );
            bullets(&mut out, "Key expenses", &money.key_expenses);
            bullets(&mut out, "Risks", &plan.risks);
            bullets(&mut out, "Next steps", &plan.next_steps);
        }
        BuilderResult::CompetitorAnalysis(analysis) => {
            let _ = writeln!(out, "{}", analysis.market_overview);
            let _ = writeln!(out, "Threat level: {}", analysis.threat_level.as_str());
            for competitor in &analysis.direct_competitors {
                let _ = writeln!(
                    out,
                    "  {} ({}, {}): + {} / - {}",
                    competitor.name,
                    competitor.pricing,
                    competitor.market_share,
                    competitor.strengths,
                    competitor.weaknesses
                );
            }
            bullets(&mut out, "Market gaps", &analysis.market_gaps);
            let _ = writeln!(out, "Positioning: {}", analysis.positioning_strategy);
            bullets(&mut out, "Differentiators", &analysis.differentiators);
        }
        BuilderResult::MarketingCopy(copy) => {
            bullets(&mut out, "Headlines", &copy.headlines);
            for (index, email) in copy.email_sequence.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "Email {}: {} ({})\n{}",
                    index + 1,
                    email.subject,
                    email.preview,
                    email.body
                );
            }
            bullets(&mut out, "Social posts", &copy.social_posts);
            let landing = &copy.landing_page_copy;
            let _ = writeln!(out, "{}\n{}", landing.hero_headline, landing.hero_subheadline);
            bullets(&mut out, "Features", &landing.features);
            let _ = writeln!(out, "CTA: {}", landing.cta);
            bullets(&mut out, "Testimonials", &landing.testimonial_templates);
            bullets(&mut out, "Ads", &copy.ad_copy);
        }
    }
    out
}
