/// Reserved token that suppresses the banner and ends the stop list.
pub const NO_TITLE_FLAG: &str = "--no-title";

/// What a run should do, decided before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// `false` if [`NO_TITLE_FLAG`] appears anywhere in the arguments.
    pub show_banner: bool,
    /// Stop ids in input order, up to (excluding) the first [`NO_TITLE_FLAG`].
    pub stops: Vec<String>,
}

impl Invocation {
    /// Partition the positional arguments.
    ///
    /// Stop ids are not validated; anything other than the flag is a candidate.
    /// Arguments after the flag are never processed, even real stop ids.
    #[must_use]
    pub fn scan<S: AsRef<str>>(args: &[S]) -> Self {
        let show_banner = !args.iter().any(|a| a.as_ref() == NO_TITLE_FLAG);
        let stops = args
            .iter()
            .map(AsRef::as_ref)
            .take_while(|a| *a != NO_TITLE_FLAG)
            .map(str::to_owned)
            .collect();
        Self { show_banner, stops }
    }
}
