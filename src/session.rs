// Session: the glue between the pure state container and the outside
// world. It feeds actions to `StylerState::reduce`, runs the effects
// that come back (stylize request, file save) and feeds the outcome in
// again.

use anyhow::Result;
use std::path::PathBuf;

use crate::api::Stylizer;
use crate::config::Config;
use crate::download;
use crate::file::SelectedFile;
use crate::preview::PreviewHandle;
use crate::state::{Action, Effect, RequestState, StylerState};
use crate::style::Style;
use crate::styled::ResultImage;

pub struct Session<S> {
    state: StylerState,
    stylizer: S,
    download_dir: PathBuf,
}

impl<S: Stylizer> Session<S> {
    pub fn new(stylizer: S, config: &Config) -> Self {
        Session {
            state: StylerState::new(config.default_style),
            stylizer,
            download_dir: config.download_dir.clone(),
        }
    }

    pub fn state(&self) -> &StylerState {
        &self.state
    }

    pub fn stylizer(&self) -> &S {
        &self.stylizer
    }

    pub fn download_dir(&self) -> &std::path::Path {
        &self.download_dir
    }

    fn dispatch(&mut self, action: Action) -> Option<Effect> {
        let (state, effect) = std::mem::take(&mut self.state).reduce(action);
        self.state = state;
        effect
    }

    /// Replace the selected image. A preview copy is made on the way in;
    /// if that fails the file is still selected, just without a preview.
    pub fn select_file(&mut self, file: SelectedFile) {
        let preview = match PreviewHandle::create(&file) {
            Ok(preview) => Some(preview),
            Err(err) => {
                log::warn!("no preview for {}: {err:#}", file.name());
                None
            }
        };
        self.dispatch(Action::SelectFile { file, preview });
    }

    pub fn select_style(&mut self, style: Style) {
        self.dispatch(Action::SelectStyle(style));
    }

    pub fn clear_style(&mut self) {
        self.dispatch(Action::ClearStyle);
    }

    /// Submit the current file and style and wait for the reply. Returns
    /// the request state the session ends up in.
    pub fn generate(&mut self) -> &RequestState {
        if let Some(Effect::Stylize {
            generation,
            file,
            style,
        }) = self.dispatch(Action::Generate)
        {
            let outcome = self
                .stylizer
                .stylize(&file, style)
                .and_then(ResultImage::decode);
            self.dispatch(Action::Resolve {
                generation,
                outcome,
            });
        }
        self.state.request()
    }

    /// Save the current result. `Ok(None)` when there is nothing to save.
    pub fn download(&mut self) -> Result<Option<PathBuf>> {
        match self.dispatch(Action::Download) {
            Some(Effect::Save(image)) => download::save(&self.download_dir, &image).map(Some),
            _ => Ok(None),
        }
    }
}
