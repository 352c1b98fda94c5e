#[derive(Clone, Copy, Debug)]
pub(crate) struct CommandSpec {
    pub command: &'static str,
    pub action: &'static str,
    pub arg_key: &'static str,
}

/// Commands whose whole remainder is one free-text argument.
pub(crate) const RAW_ARG_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: "category",
        action: "set_category",
        arg_key: "category",
    },
    CommandSpec {
        command: "target",
        action: "set_target",
        arg_key: "target",
    },
    CommandSpec {
        command: "prompt",
        action: "set_prompt",
        arg_key: "prompt",
    },
    CommandSpec {
        command: "modal_category",
        action: "set_modal_category",
        arg_key: "category",
    },
    CommandSpec {
        command: "modal_target",
        action: "set_modal_target",
        arg_key: "target",
    },
];

/// Commands taking one filename, quoted with shell rules when it has spaces.
pub(crate) const FILE_ARG_COMMANDS: &[CommandSpec] = &[CommandSpec {
    command: "pick",
    action: "open_reflect",
    arg_key: "file",
}];

pub(crate) const NO_ARG_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: "info",
        action: "show_info",
        arg_key: "",
    },
    CommandSpec {
        command: "targets",
        action: "list_targets",
        arg_key: "",
    },
    CommandSpec {
        command: "candidates",
        action: "list_candidates",
        arg_key: "",
    },
    CommandSpec {
        command: "refresh",
        action: "refresh",
        arg_key: "",
    },
    CommandSpec {
        command: "generate",
        action: "generate",
        arg_key: "",
    },
    CommandSpec {
        command: "confirm",
        action: "confirm_reflect",
        arg_key: "",
    },
    CommandSpec {
        command: "cancel",
        action: "cancel_reflect",
        arg_key: "",
    },
    CommandSpec {
        command: "help",
        action: "help",
        arg_key: "",
    },
    CommandSpec {
        command: "quit",
        action: "quit",
        arg_key: "",
    },
    CommandSpec {
        command: "exit",
        action: "quit",
        arg_key: "",
    },
];

pub const CONSOLE_HELP_COMMANDS: &[&str] = &[
    "/category",
    "/target",
    "/prompt",
    "/info",
    "/targets",
    "/candidates",
    "/refresh",
    "/generate",
    "/pick",
    "/modal_category",
    "/modal_target",
    "/confirm",
    "/cancel",
    "/help",
    "/quit",
];
