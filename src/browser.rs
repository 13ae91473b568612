use std::sync::Arc;
use std::time::{Duration, Instant};

use headless_chrome::{Browser, LaunchOptions, Tab};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::error::FetchError;
use crate::settings::{Credentials, Settings};

/// How long to keep scrolling so lazy-loaded cards render.
#[derive(Debug, Clone)]
pub struct ScrollPlan {
    pub total: Duration,
    pub step_px: u32,
    pub pause: Duration,
}

impl ScrollPlan {
    pub fn from_settings(settings: &Settings) -> Self {
        ScrollPlan {
            total: settings.scroll_total(),
            step_px: settings.scroll_step_px,
            pause: settings.scroll_pause(),
        }
    }

    /// Successive `(from, to)` scroll targets, one step apart.
    pub fn targets(&self) -> impl Iterator<Item = (u64, u64)> {
        let step = u64::from(self.step_px);
        std::iter::successors(Some(0u64), move |y| Some(y.saturating_add(step)))
            .map(move |y| (y, y.saturating_add(step)))
    }
}

pub trait BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<(), FetchError>;
    fn authenticate(&mut self, credentials: &Credentials) -> Result<(), FetchError>;
    fn scroll_and_wait(&mut self, plan: &ScrollPlan) -> Result<(), FetchError>;
    fn page_markup(&mut self) -> Result<String, FetchError>;
}

/// Log in, open the profile, scroll until the plan elapses, return the markup.
pub fn fetch_profile_markup<S: BrowserSession>(
    session: &mut S,
    credentials: &Credentials,
    url: &str,
    plan: &ScrollPlan,
) -> Result<String, FetchError> {
    session.authenticate(credentials)?;
    session.navigate(url)?;
    session.scroll_and_wait(plan)?;
    let markup = session.page_markup()?;
    info!("Fetched {} ({} bytes)", url, markup.len());
    Ok(markup)
}

pub struct ChromeSession {
    // keeps the Chrome process alive for the tab
    _browser: Browser,
    tab: Arc<Tab>,
    login_url: String,
}

impl ChromeSession {
    pub fn launch(settings: &Settings) -> Result<Self, FetchError> {
        let options = LaunchOptions::default_builder()
            .headless(settings.headless)
            .build()
            .map_err(|e| FetchError::Browser {
                step: "configure launch",
                reason: e.to_string(),
            })?;
        let browser = Browser::new(options).map_err(FetchError::at("launch"))?;
        let tab = browser.new_tab().map_err(FetchError::at("open tab"))?;
        Ok(ChromeSession {
            _browser: browser,
            tab,
            login_url: settings.login_url.clone(),
        })
    }

    fn fill(&self, selector: &str, value: &str) -> Result<(), FetchError> {
        self.tab
            .wait_for_element(selector)
            .and_then(|el| el.click().map(|_| ()))
            .map_err(FetchError::at("focus login field"))?;
        self.tab
            .type_str(value)
            .map_err(FetchError::at("type login field"))?;
        Ok(())
    }
}

impl BrowserSession for ChromeSession {
    fn navigate(&mut self, url: &str) -> Result<(), FetchError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(FetchError::at("navigate"))?;
        Ok(())
    }

    fn authenticate(&mut self, credentials: &Credentials) -> Result<(), FetchError> {
        let login_url = self.login_url.clone();
        self.navigate(&login_url)?;
        self.fill("#username", &credentials.username)?;
        self.fill("#password", &credentials.password)?;
        self.tab
            .wait_for_element("button[type=submit]")
            .and_then(|el| el.click().map(|_| ()))
            .map_err(FetchError::at("submit login"))?;
        self.tab
            .wait_until_navigated()
            .map_err(FetchError::at("finish login"))?;
        info!("Logged in as {}", credentials.username);
        Ok(())
    }

    fn scroll_and_wait(&mut self, plan: &ScrollPlan) -> Result<(), FetchError> {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}") {
            pb.set_style(style);
        }

        let start = Instant::now();
        for (from, to) in plan.targets() {
            self.tab
                .evaluate(&format!("window.scrollTo({}, {})", from, to), false)
                .map_err(FetchError::at("scroll"))?;
            pb.set_message(format!("scrolled to {}px", to));
            pb.tick();

            std::thread::sleep(plan.pause);
            if start.elapsed() > plan.total {
                break;
            }
        }

        pb.finish_and_clear();
        Ok(())
    }

    fn page_markup(&mut self) -> Result<String, FetchError> {
        self.tab.get_content().map_err(FetchError::at("read page"))
    }
}
