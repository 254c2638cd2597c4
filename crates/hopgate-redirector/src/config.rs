use typed_builder::TypedBuilder;

/// Static configuration of the redirect path.
///
/// Built once at startup and handed to the dispatcher; nothing on the
/// request path reads ambient configuration.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct RedirectConfig {
    /// Where to send requests that cannot be resolved.
    ///
    /// When unset, those requests get a `500` with a fixed diagnostic body.
    #[builder(default, setter(strip_option, into))]
    pub fallback_url: Option<String>,
}
