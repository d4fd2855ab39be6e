//! Domain entities.

mod embed;
mod link;
mod provider;
mod script_state;
mod toggles;

pub use embed::{
    CONTAINER_CLASS, EmbedContainer, EmbedDescriptor, ExternalScript, IframeEmbed, SizingClass,
    escape_attribute, escape_text,
};
pub use link::{Link, LinkId};
pub use provider::ProviderKind;
pub use script_state::ExternalScriptLoadState;
pub use toggles::FeatureToggles;
