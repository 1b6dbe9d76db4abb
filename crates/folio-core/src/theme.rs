use tracing::{
  debug,
  info,
  warn
};

use crate::store::{
  KeyValueStore,
  ThemeSink
};

pub const THEME_STORAGE_KEY: &str =
  "mode";

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum ThemeMode {
  #[default]
  Light,
  Dark
}

impl ThemeMode {
  pub fn from_storage_value(
    raw: &str
  ) -> Option<Self> {
    match raw {
      | "light" => Some(Self::Light),
      | "dark" => Some(Self::Dark),
      | _ => None
    }
  }

  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  pub fn next(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }

  /// Bootstrap icon offered by the toggle:
  /// the mode a click switches to.
  pub fn toggle_icon(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "moon",
      | Self::Dark => "sun"
    }
  }

  pub fn toggle_label(
    self
  ) -> &'static str {
    match self {
      | Self::Light => {
        "Switch to dark mode"
      }
      | Self::Dark => {
        "Switch to light mode"
      }
    }
  }
}

/// Owns the light/dark preference for a
/// page session.
///
/// The sink is written only from here;
/// storage is written on every toggle and
/// never on initialization.
pub struct ThemeController<S, P> {
  mode:    ThemeMode,
  storage: S,
  sink:    P
}

impl<S, P> ThemeController<S, P>
where
  S: KeyValueStore,
  P: ThemeSink
{
  pub fn new(
    storage: S,
    sink: P
  ) -> Self {
    Self {
      mode: ThemeMode::default(),
      storage,
      sink
    }
  }

  pub fn mode(&self) -> ThemeMode {
    self.mode
  }

  #[tracing::instrument(skip(self))]
  pub fn initialize(&mut self) {
    let stored = self
      .storage
      .get(THEME_STORAGE_KEY)
      .filter(|value| !value.is_empty());

    let Some(raw) = stored else {
      debug!(
        mode = self.mode.storage_value(),
        "no stored theme; keeping default"
      );
      return;
    };

    match ThemeMode::from_storage_value(
      &raw
    ) {
      | Some(mode) => {
        self.mode = mode;
        self.sink.apply(mode);
        info!(
          mode = mode.storage_value(),
          "restored theme from storage"
        );
      }
      | None => {
        warn!(
          stored = %raw,
          "ignoring unrecognised stored \
           theme"
        );
      }
    }
  }

  #[tracing::instrument(skip(self))]
  pub fn toggle(&mut self) {
    let next = self.mode.next();
    self.mode = next;
    self.sink.apply(next);

    if let Err(error) = self.storage.set(
      THEME_STORAGE_KEY,
      next.storage_value()
    ) {
      warn!(
        %error,
        "failed persisting theme; \
         continuing with in-memory mode"
      );
    }

    info!(
      mode = next.storage_value(),
      "toggled theme"
    );
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  pub fn sink(&self) -> &P {
    &self.sink
  }
}
