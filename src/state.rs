// Styler state container.
//
// The whole UI state is one value that only changes through
// `StylerState::reduce`. Reducing never touches the network or the
// disk: when an action needs a side effect the reducer hands back an
// `Effect` for the caller to run, and the outcome comes back in as
// another action. That keeps every transition testable without I/O.
//
// Request lifecycle: `Idle -> Submitting -> {Succeeded, Failed}`, then
// `Submitting` again on the next `Generate`.

use crate::error::{StylerError, ValidationError};
use crate::file::SelectedFile;
use crate::preview::PreviewHandle;
use crate::style::Style;
use crate::styled::ResultImage;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug)]
pub enum Action {
    /// A new image was picked. The preview is optional because the
    /// temporary copy can fail to be created without blocking the flow.
    SelectFile {
        file: SelectedFile,
        preview: Option<PreviewHandle>,
    },
    SelectStyle(Style),
    ClearStyle,
    Generate,
    /// Outcome of the request started by the `Generate` with this
    /// generation number.
    Resolve {
        generation: u64,
        outcome: Result<ResultImage, StylerError>,
    },
    Download,
}

/// Side effect requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Stylize {
        generation: u64,
        file: SelectedFile,
        style: Style,
    },
    Save(ResultImage),
}

#[derive(Debug, Default)]
pub struct StylerState {
    file: Option<SelectedFile>,
    preview: Option<PreviewHandle>,
    style: Option<Style>,
    result: Option<ResultImage>,
    request: RequestState,
    generation: u64,
}

impl StylerState {
    pub fn new(style: Style) -> Self {
        StylerState {
            style: Some(style),
            ..Default::default()
        }
    }

    pub fn reduce(mut self, action: Action) -> (Self, Option<Effect>) {
        match action {
            Action::SelectFile { file, preview } => {
                if self.request == RequestState::Submitting {
                    // Whatever is in flight was for the old file.
                    log::info!("discarding in-flight request {}", self.generation);
                    self.generation += 1;
                }
                self.file = Some(file);
                // Assigning drops the previous handle and its temp copy.
                self.preview = preview;
                self.result = None;
                self.request = RequestState::Idle;
                (self, None)
            }
            Action::SelectStyle(style) => {
                self.style = Some(style);
                (self, None)
            }
            Action::ClearStyle => {
                self.style = None;
                (self, None)
            }
            Action::Generate => self.generate(),
            Action::Resolve {
                generation,
                outcome,
            } => {
                self.resolve(generation, outcome);
                (self, None)
            }
            Action::Download => {
                let effect = self.result.clone().map(Effect::Save);
                (self, effect)
            }
        }
    }

    fn generate(mut self) -> (Self, Option<Effect>) {
        if self.request == RequestState::Submitting {
            log::warn!("generate ignored, request {} still in flight", self.generation);
            return (self, None);
        }
        let checked = match (&self.file, self.style) {
            (None, _) => Err(ValidationError::MissingFile),
            (Some(_), None) => Err(ValidationError::MissingStyle),
            (Some(file), Some(style)) => Ok((file.clone(), style)),
        };
        match checked {
            Err(err) => {
                self.request = RequestState::Failed(err.to_string());
                (self, None)
            }
            Ok((file, style)) => {
                self.generation += 1;
                self.result = None;
                self.request = RequestState::Submitting;
                let effect = Effect::Stylize {
                    generation: self.generation,
                    file,
                    style,
                };
                (self, Some(effect))
            }
        }
    }

    fn resolve(&mut self, generation: u64, outcome: Result<ResultImage, StylerError>) {
        if generation != self.generation || self.request != RequestState::Submitting {
            log::info!(
                "dropping stale response {generation} (current {})",
                self.generation
            );
            return;
        }
        match outcome {
            Ok(image) => {
                self.result = Some(image);
                self.request = RequestState::Succeeded;
            }
            Err(err) => {
                log::warn!("request {generation} failed: {err}");
                self.request = RequestState::Failed(err.to_string());
            }
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn style(&self) -> Option<Style> {
        self.style
    }

    pub fn result(&self) -> Option<&ResultImage> {
        self.result.as_ref()
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn is_submitting(&self) -> bool {
        self.request == RequestState::Submitting
    }

    /// Message of the last failure, if the last request failed.
    pub fn error(&self) -> Option<&str> {
        match &self.request {
            RequestState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::png_bytes;

    fn picked(name: &str) -> Action {
        Action::SelectFile {
            file: SelectedFile::new(name, png_bytes(2, 2)),
            preview: None,
        }
    }

    fn result() -> ResultImage {
        ResultImage::decode(png_bytes(8, 8)).unwrap()
    }

    fn stylize_generation(effect: Option<Effect>) -> u64 {
        match effect {
            Some(Effect::Stylize { generation, .. }) => generation,
            other => panic!("expected a stylize effect, got {other:?}"),
        }
    }

    #[test]
    fn starts_idle_with_default_style() {
        let state = StylerState::new(Style::default());
        assert_eq!(state.request(), &RequestState::Idle);
        assert_eq!(state.style(), Some(Style::Ghibli));
        assert!(state.file().is_none());
        assert!(state.result().is_none());
    }

    #[test]
    fn generate_without_file_asks_for_upload() {
        let (state, effect) = StylerState::new(Style::Pixar).reduce(Action::Generate);
        assert!(effect.is_none());
        assert!(state.error().unwrap().contains("upload an image"));
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn generate_without_style_makes_no_request() {
        let state = StylerState::new(Style::Pixar);
        let (state, _) = state.reduce(picked("a.png"));
        let (state, _) = state.reduce(Action::ClearStyle);
        let (state, effect) = state.reduce(Action::Generate);
        assert!(effect.is_none());
        assert_eq!(state.error(), Some("Please choose a style."));
    }

    #[test]
    fn generate_emits_request_with_file_and_style() {
        let (state, _) = StylerState::new(Style::Ghibli).reduce(picked("a.png"));
        let (state, _) = state.reduce(Action::SelectStyle(Style::Disney));
        let (state, effect) = state.reduce(Action::Generate);

        match effect {
            Some(Effect::Stylize {
                generation,
                file,
                style,
            }) => {
                assert_eq!(generation, 1);
                assert_eq!(file.name(), "a.png");
                assert_eq!(style, Style::Disney);
            }
            other => panic!("unexpected effect {other:?}"),
        }
        assert!(state.is_submitting());
    }

    #[test]
    fn success_sets_result_and_clears_error() {
        let (state, _) = StylerState::new(Style::Ghibli).reduce(Action::Generate);
        assert!(state.error().is_some());

        let (state, _) = state.reduce(picked("a.png"));
        let (state, effect) = state.reduce(Action::Generate);
        let generation = stylize_generation(effect);
        let (state, _) = state.reduce(Action::Resolve {
            generation,
            outcome: Ok(result()),
        });

        assert_eq!(state.request(), &RequestState::Succeeded);
        assert_eq!(state.result().unwrap().dimensions(), (8, 8));
        assert!(state.error().is_none());
    }

    #[test]
    fn failure_surfaces_service_message() {
        let (state, _) = StylerState::new(Style::Ghibli).reduce(picked("a.png"));
        let (state, effect) = state.reduce(Action::Generate);
        let generation = stylize_generation(effect);
        let (state, _) = state.reduce(Action::Resolve {
            generation,
            outcome: Err(StylerError::Service("bad format".into())),
        });

        assert_eq!(state.error(), Some("bad format"));
        assert!(state.result().is_none());
        assert!(!state.is_submitting());
    }

    #[test]
    fn new_submission_clears_previous_result() {
        let (state, _) = StylerState::new(Style::Ghibli).reduce(picked("a.png"));
        let (state, effect) = state.reduce(Action::Generate);
        let (state, _) = state.reduce(Action::Resolve {
            generation: stylize_generation(effect),
            outcome: Ok(result()),
        });
        assert!(state.result().is_some());

        let (state, effect) = state.reduce(Action::Generate);
        assert_eq!(stylize_generation(effect), 2);
        assert!(state.result().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn selecting_file_clears_result_and_error() {
        let (state, _) = StylerState::new(Style::Ghibli).reduce(picked("a.png"));
        let (state, effect) = state.reduce(Action::Generate);
        let (state, _) = state.reduce(Action::Resolve {
            generation: stylize_generation(effect),
            outcome: Ok(result()),
        });

        let (state, _) = state.reduce(picked("b.png"));
        assert!(state.result().is_none());
        assert_eq!(state.request(), &RequestState::Idle);
        assert_eq!(state.file().unwrap().name(), "b.png");

        let (state, _) = state.reduce(Action::ClearStyle);
        let (state, _) = state.reduce(Action::Generate);
        assert!(state.error().is_some());
        let (state, _) = state.reduce(picked("c.png"));
        assert!(state.error().is_none());
    }

    #[test]
    fn second_generate_while_in_flight_is_ignored() {
        let (state, _) = StylerState::new(Style::Ghibli).reduce(picked("a.png"));
        let (state, first) = state.reduce(Action::Generate);
        assert!(first.is_some());

        let (state, second) = state.reduce(Action::Generate);
        assert!(second.is_none());
        assert_eq!(state.generation(), 1);
        assert!(state.is_submitting());
    }

    #[test]
    fn response_for_replaced_file_is_discarded() {
        let (state, _) = StylerState::new(Style::Ghibli).reduce(picked("a.png"));
        let (state, effect) = state.reduce(Action::Generate);
        let stale = stylize_generation(effect);

        let (state, _) = state.reduce(picked("b.png"));
        let (state, _) = state.reduce(Action::Resolve {
            generation: stale,
            outcome: Ok(result()),
        });

        assert!(state.result().is_none());
        assert_eq!(state.request(), &RequestState::Idle);
    }

    #[test]
    fn download_needs_a_result() {
        let (state, effect) = StylerState::new(Style::Ghibli).reduce(Action::Download);
        assert!(effect.is_none());

        let (state, _) = state.reduce(picked("a.png"));
        let (state, effect) = state.reduce(Action::Generate);
        let (state, _) = state.reduce(Action::Resolve {
            generation: stylize_generation(effect),
            outcome: Ok(result()),
        });
        let (_, effect) = state.reduce(Action::Download);
        assert_eq!(effect, Some(Effect::Save(result())));
    }

    #[test]
    fn replacing_file_releases_previous_preview() {
        let file = SelectedFile::new("a.png", png_bytes(1, 1));
        let preview = PreviewHandle::create(&file).unwrap();
        let old_path = preview.path().to_path_buf();

        let (state, _) = StylerState::new(Style::Ghibli).reduce(Action::SelectFile {
            file,
            preview: Some(preview),
        });
        assert!(old_path.exists());

        let next = SelectedFile::new("b.png", png_bytes(1, 1));
        let preview = PreviewHandle::create(&next).unwrap();
        let (state, _) = state.reduce(Action::SelectFile {
            file: next,
            preview: Some(preview),
        });

        assert!(!old_path.exists());
        assert!(state.preview().unwrap().path().exists());
    }
}
