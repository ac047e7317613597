use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    registrar completions bash > ~/.bash_completion.d/registrar\n\n\
                  Generate zsh completions:\n    registrar completions zsh > ~/.zfunc/_registrar\n\n\
                  Generate fish completions:\n    registrar completions fish > ~/.config/fish/completions/registrar.fish\n\n\
                  Generate PowerShell completions:\n    registrar completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
