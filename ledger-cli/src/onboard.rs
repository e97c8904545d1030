/// What the setup screen needs to know about the two connection settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetupState {
    pub has_url: bool,
    pub has_key: bool,
}

/// Whether the normal UI may start, and if not, which settings are still missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardDecision {
    pub ready: bool,
    pub missing: Vec<&'static str>,
    pub message: String,
}

pub fn decide_next_step(state: &SetupState) -> OnboardDecision {
    let mut missing = Vec::new();
    if !state.has_url {
        missing.push("supabase.url");
    }
    if !state.has_key {
        missing.push("supabase.anon_key");
    }

    // URL first: the key is useless without a project to point it at.
    let message = if !state.has_url {
        "Add your Supabase project URL (Project Settings → API) to start tracking your finances."
    } else if !state.has_key {
        "Add your Supabase anon key (Project Settings → API) to start tracking your finances."
    } else {
        "Connected settings look complete."
    };

    OnboardDecision {
        ready: missing.is_empty(),
        missing,
        message: message.to_string(),
    }
}
