//! Turns embed descriptors into containers placed after their link.

use tracing::debug;

use crate::domain::entities::{
    EmbedContainer, EmbedDescriptor, ExternalScript, ExternalScriptLoadState, IframeEmbed, LinkId,
    escape_attribute,
};
use crate::domain::ports::DocumentRegion;

/// Renders descriptors and owns the external script load state.
#[derive(Debug)]
pub struct EmbedRenderer {
    scripts: ExternalScriptLoadState,
    widget_script_src: String,
}

impl EmbedRenderer {
    /// Creates renderer; `widget_script_src` hydrates microblog markup.
    #[must_use]
    pub fn new(widget_script_src: impl Into<String>) -> Self {
        Self {
            scripts: ExternalScriptLoadState::new(),
            widget_script_src: widget_script_src.into(),
        }
    }

    /// Inserts the container after the link, then injects the required script
    /// the first time it is needed. The link itself is left untouched.
    pub fn render(
        &mut self,
        region: &mut dyn DocumentRegion,
        link: LinkId,
        descriptor: &EmbedDescriptor,
    ) {
        region.insert_after(link, Self::container(descriptor));

        if let EmbedDescriptor::RawMarkup {
            external_script: Some(script),
            ..
        } = descriptor
            && self.scripts.mark_loaded(*script)
        {
            debug!(script = ?script, "Injecting external rendering script");
            region.append_script(self.script_src(*script));
        }
    }

    /// Returns the script load state.
    #[must_use]
    pub const fn script_state(&self) -> &ExternalScriptLoadState {
        &self.scripts
    }

    fn script_src(&self, script: ExternalScript) -> &str {
        match script {
            ExternalScript::MicroblogWidgets => &self.widget_script_src,
        }
    }

    /// Builds the container markup for a descriptor.
    #[must_use]
    pub fn container(descriptor: &EmbedDescriptor) -> EmbedContainer {
        let inner = match descriptor {
            EmbedDescriptor::Iframe(frame) => iframe_markup(frame),
            EmbedDescriptor::NativeVideo { src } => {
                format!(r#"<video src="{}" controls loop></video>"#, escape_attribute(src))
            }
            EmbedDescriptor::RawMarkup { html, .. } => html.clone(),
        };
        EmbedContainer::new(descriptor.sizing(), inner)
    }
}

fn iframe_markup(frame: &IframeEmbed) -> String {
    let mut markup = format!(r#"<iframe src="{}""#, escape_attribute(&frame.src));
    if !frame.scrolling {
        markup.push_str(r#" scrolling="no""#);
    }
    if let Some(allow) = &frame.allow {
        markup.push_str(&format!(r#" allow="{}""#, escape_attribute(allow)));
    }
    if frame.allow_fullscreen {
        markup.push_str(r#" allowfullscreen="true""#);
    }
    if let Some(height) = frame.height_px {
        markup.push_str(&format!(r#" style="height: {height}px;""#));
    }
    markup.push_str("></iframe>");
    markup
}
