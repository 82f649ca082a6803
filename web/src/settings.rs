use crate::utils::*;
use raspadinha_core as card;
use serde::{Deserialize, Serialize};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "light",
            Dark => "dark",
        }
    }

    fn update_html(theme: Option<Self>) {
        use gloo::utils::document;
        let html = document()
            .query_selector("html")
            .expect("query must be correct")
            .expect("must have html element");
        if let Some(theme) = theme {
            let scheme = theme.scheme();
            log::debug!("theme-scheme: {}", scheme);
            if let Err(err) = html.set_attribute(Self::ATTR_NAME, scheme) {
                log::error!("failed to set theme: {:?}", err);
            }
        } else {
            log::debug!("no theme preference");
            if let Err(err) = html.remove_attribute(Self::ATTR_NAME) {
                log::error!("failed to set theme: {:?}", err);
            }
        }
    }

    pub(crate) fn init() {
        Self::update_html(LocalOrDefault::local_or_default());
    }

    pub(crate) fn apply(theme: Option<Self>) {
        theme.local_save();
        Self::update_html(theme);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "raspadinha:theme";
}

/// User-tunable odds. `None` keeps a stock table, so the unvalidated
/// defaults never have to pass the validator they predate.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub win_count_weights: Option<Vec<f64>>,
    pub reward_weights: Option<Vec<f64>>,
}

impl Settings {
    /// Builds the generation rules, running the overrides through the
    /// validating setters. A stored override that no longer validates is
    /// dropped with a warning rather than poisoning the next card.
    pub(crate) fn to_rules(&self) -> card::CardRules {
        let mut rules = card::CardRules::standard();
        if let Some(weights) = &self.win_count_weights {
            if let Err(err) = rules.set_win_count_weights(weights.clone()) {
                log::warn!("stored winning-count weights rejected: {err}");
            }
        }
        if let Some(weights) = &self.reward_weights {
            if let Err(err) = rules.set_reward_weights(weights.clone()) {
                log::warn!("stored reward weights rejected: {err}");
            }
        }
        rules
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "raspadinha:settings:v1";
}

fn parse_weights(input: &str) -> Result<Vec<f64>, String> {
    input
        .split(',')
        .map(|field| {
            let field = field.trim();
            field
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", field))
        })
        .collect()
}

fn format_weights(weights: &[f64]) -> String {
    weights
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub onclose: Callback<()>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let stored: Settings = LocalOrDefault::local_or_default();
    let stock = card::CardRules::standard();

    let win_input = use_state(|| {
        format_weights(
            stored
                .win_count_weights
                .as_deref()
                .unwrap_or(stock.win_count_table().weights()),
        )
    });
    let reward_input = use_state(|| {
        format_weights(
            stored
                .reward_weights
                .as_deref()
                .unwrap_or(stock.reward_table().weights()),
        )
    });
    let error = use_state(|| Option::<String>::None);

    let on_win_input = {
        let win_input = win_input.clone();
        Callback::from(move |e: InputEvent| {
            let field: HtmlInputElement = e.target_unchecked_into();
            win_input.set(field.value());
        })
    };
    let on_reward_input = {
        let reward_input = reward_input.clone();
        Callback::from(move |e: InputEvent| {
            let field: HtmlInputElement = e.target_unchecked_into();
            reward_input.set(field.value());
        })
    };

    let on_apply = {
        let win_input = win_input.clone();
        let reward_input = reward_input.clone();
        let error = error.clone();
        let onclose = props.onclose.clone();
        Callback::from(move |_: MouseEvent| {
            let checked = (|| -> Result<Settings, String> {
                let win = parse_weights(&win_input)?;
                let reward = parse_weights(&reward_input)?;
                let mut probe = card::CardRules::standard();
                probe
                    .set_win_count_weights(win.clone())
                    .map_err(|err| err.to_string())?;
                probe
                    .set_reward_weights(reward.clone())
                    .map_err(|err| err.to_string())?;
                Ok(Settings {
                    win_count_weights: Some(win),
                    reward_weights: Some(reward),
                })
            })();

            match checked {
                Ok(settings) => {
                    settings.local_save();
                    error.set(None);
                    onclose.emit(());
                }
                Err(reason) => {
                    log::debug!("settings rejected: {}", reason);
                    error.set(Some(reason));
                }
            }
        })
    };

    let on_cancel = {
        let error = error.clone();
        let onclose = props.onclose.clone();
        Callback::from(move |_: MouseEvent| {
            error.set(None);
            onclose.emit(());
        })
    };

    let theme_switch = |theme: Option<Theme>| {
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            Theme::apply(theme);
        })
    };

    html! {
        <dialog id="settings" open={props.open}>
            <article>
                <h2>{"Settings"}</h2>
                <label>
                    {"Winning-count weights (6, sum 100)"}
                    <input type="text" value={(*win_input).clone()} oninput={on_win_input}/>
                </label>
                <label>
                    {"Reward weights (3, sum 100)"}
                    <input type="text" value={(*reward_input).clone()} oninput={on_reward_input}/>
                </label>
                if let Some(reason) = (*error).clone() {
                    <p class="error">{reason}</p>
                }
                <ul>
                    <li><a href="#" onclick={theme_switch(None)}>{"Auto"}</a></li>
                    <li><a href="#" onclick={theme_switch(Some(Theme::Light))}>{"Light"}</a></li>
                    <li><a href="#" onclick={theme_switch(Some(Theme::Dark))}>{"Dark"}</a></li>
                </ul>
                <footer>
                    <button onclick={on_cancel}>{"Cancel"}</button>
                    <button onclick={on_apply}>{"Apply"}</button>
                </footer>
            </article>
        </dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_parse_from_comma_separated_text() {
        assert_eq!(
            parse_weights("0, 30.5, 24.5, 20, 15, 10").unwrap(),
            vec![0.0, 30.5, 24.5, 20.0, 15.0, 10.0]
        );
        assert!(parse_weights("10, twenty, 70").is_err());
    }

    #[test]
    fn formatting_round_trips_through_the_parser() {
        let weights = vec![0.5, 20.0, 20.0, 20.0, 20.0, 19.5];
        assert_eq!(parse_weights(&format_weights(&weights)).unwrap(), weights);
    }

    #[test]
    fn default_settings_keep_the_stock_tables() {
        let rules = Settings::default().to_rules();
        assert_eq!(rules, card::CardRules::standard());
    }

    #[test]
    fn overrides_flow_through_the_validating_setters() {
        let settings = Settings {
            win_count_weights: Some(vec![0.0, 30.0, 25.0, 20.0, 15.0, 10.0]),
            reward_weights: Some(vec![60.0, 30.0, 10.0]),
        };
        let rules = settings.to_rules();
        assert_eq!(
            rules.win_count_table().weights(),
            &[0.0, 30.0, 25.0, 20.0, 15.0, 10.0]
        );
        assert_eq!(rules.reward_table().weights(), &[60.0, 30.0, 10.0]);
    }

    #[test]
    fn invalid_stored_overrides_fall_back_to_stock() {
        let settings = Settings {
            win_count_weights: Some(vec![10.0, 10.0]),
            reward_weights: None,
        };
        assert_eq!(settings.to_rules(), card::CardRules::standard());
    }
}
