//! Fixed copy and contact details rendered by the landing page.

pub const HERO_TITLE: &str = "dinonuwg";
pub const HERO_SUBTITLE: &str = "Having fun with Programming | UI Design | Software Development";
pub const EMAIL: &str = "dinonuwg@gmail.com";
pub const DISCORD_HANDLE: &str = "dinonuwg";
pub const GITHUB_PROFILE_URL: &str = "https://github.com/dinonuwg";
pub const FOOTER_NOTICE: &str = "\u{a9} 2025 dinonuwg. All rights reserved.";

pub const ABOUT_PARAGRAPHS: [&str; 2] = [
    "Hello! I'm dinonuwg, passionate about having fun with programming, UI design, and software development. These are my main interests, and I'm eager to learn and grow in these fields.",
    "When I'm not working on projects, I enjoy exploring new technologies.",
];

pub struct Interest {
    pub title: &'static str,
    pub description: &'static str,
}

pub const INTERESTS: [Interest; 3] = [
    Interest {
        title: "Programming",
        description: "Having fun building applications and solving problems through code.",
    },
    Interest {
        title: "UI Design",
        description: "Creating intuitive and beautiful user interfaces.",
    },
    Interest {
        title: "Software Development",
        description: "Developing innovative software solutions.",
    },
];

const DEFAULT_REPOS_URL: &str = "https://api.github.com/users/dinonuwg/repos";

/// Listing endpoint the client fetches. `PORTFOLIO_REPOS_URL` at build time
/// points it elsewhere, e.g. at the server's `/api/repos` mirror.
pub fn repos_url() -> &'static str {
    resolve_repos_url(option_env!("PORTFOLIO_REPOS_URL"))
}

fn resolve_repos_url(configured: Option<&'static str>) -> &'static str {
    configured
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_REPOS_URL)
}

/// Something the contact controls can put on the clipboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipboardTarget {
    Email,
    Discord,
}

impl ClipboardTarget {
    pub fn value(self) -> &'static str {
        match self {
            Self::Email => EMAIL,
            Self::Discord => DISCORD_HANDLE,
        }
    }

    pub fn confirmation(self) -> &'static str {
        match self {
            Self::Email => "Email copied to clipboard",
            Self::Discord => "Discord tag copied to clipboard",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Discord => "discord",
        }
    }
}
