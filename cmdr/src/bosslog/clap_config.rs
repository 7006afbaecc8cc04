// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use bosslog_field_schema::{DocumentType, FieldType};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(bin_name = "bosslog")]
#[command(about = "📇 Keep track of what you know about your bosses")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(true))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version} 💻\n\nUSAGE 📓:\n  bosslog [\x1b[32mCommand\x1b[0m] [\x1b[34mOptions\x1b[0m]\n\n{all-args}\n",
    subcommand_help_heading("Command")
)]
/// More info:
/// - <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CLIArg {
    #[command(subcommand)]
    pub command: CLICommand,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to `bosslog/log.txt` in your config folder for debugging"
    )]
    pub enable_logging: bool,
}

/// Arguments shared by every command that works on a document file.
#[derive(Debug, Clone, Args)]
pub struct DocumentArg {
    #[arg(value_name = "doc.json", help = "Path to a JSON profile document")]
    pub path: PathBuf,

    #[arg(
        long,
        short = 't',
        value_name = "user|boss",
        value_parser = DocumentType::try_from_type_name,
        help = "Kind of profile stored in the document"
    )]
    pub doc_type: DocumentType,
}

#[derive(Debug, Subcommand)]
pub enum CLICommand {
    #[clap(about = "🔑 Print the key a field label normalizes to\n💡 Eg: `bosslog normalize \"My Label!!\"`")]
    Normalize {
        #[arg(value_name = "label")]
        label: String,
    },

    #[clap(about = "🧩 Manage the custom fields of a document with: `add`, `rm`, and `can-delete`")]
    Field {
        #[command(subcommand)]
        subcommand: FieldSubcommand,
    },

    #[clap(about = "📄 Print a document as a plain text profile")]
    Show {
        #[command(flatten)]
        document: DocumentArg,
    },

    #[clap(
        about = "✏️ Edit one field of a document the same way the app does, and report the save\n💡 Eg: `bosslog set boss.json -t boss --key name --value Sara`"
    )]
    Set {
        #[command(flatten)]
        document: DocumentArg,

        #[arg(long, short = 'k')]
        key: String,

        #[arg(long, short = 'v')]
        value: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum FieldSubcommand {
    #[clap(about = "Add a custom field and print its generated key")]
    Add {
        #[command(flatten)]
        document: DocumentArg,

        #[arg(long)]
        label: String,

        #[arg(long, short = 'v', default_value = "")]
        value: String,

        #[arg(long, default_value_t = FieldType::Text)]
        field_type: FieldType,
    },

    #[clap(about = "Remove a custom field and its metadata")]
    Rm {
        #[command(flatten)]
        document: DocumentArg,

        #[arg(long, short = 'k')]
        key: String,
    },

    #[clap(about = "Print `true` if the field could be removed from this kind of document")]
    CanDelete {
        /// Taken as is, so an unknown type prints `false` instead of failing.
        #[arg(long, short = 't', value_name = "user|boss")]
        doc_type: String,

        #[arg(long, short = 'k')]
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() { CLIArg::command().debug_assert(); }

    #[test]
    fn test_parse_field_add() {
        let cli_arg = CLIArg::try_parse_from([
            "bosslog",
            "field",
            "add",
            "boss.json",
            "--doc-type",
            "boss",
            "--label",
            "Favorite coffee",
            "--value",
            "Flat white",
            "--field-type",
            "multiline",
            "-l",
        ])
        .unwrap();

        assert!(cli_arg.global_options.enable_logging);
        let CLICommand::Field {
            subcommand:
                FieldSubcommand::Add {
                    document,
                    label,
                    value,
                    field_type,
                },
        } = cli_arg.command
        else {
            panic!("expected `field add`");
        };
        assert_eq!(document.path, PathBuf::from("boss.json"));
        assert_eq!(document.doc_type, DocumentType::Boss);
        assert_eq!(label, "Favorite coffee");
        assert_eq!(value, "Flat white");
        assert_eq!(field_type, FieldType::Multiline);
    }

    #[test]
    fn test_unknown_doc_type_is_rejected() {
        let result =
            CLIArg::try_parse_from(["bosslog", "show", "doc.json", "--doc-type", "manager"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_can_delete_takes_any_doc_type() {
        let cli_arg = CLIArg::try_parse_from([
            "bosslog",
            "field",
            "can-delete",
            "--doc-type",
            "manager",
            "--key",
            "custom_ab12",
        ])
        .unwrap();
        assert!(matches!(
            cli_arg.command,
            CLICommand::Field {
                subcommand: FieldSubcommand::CanDelete { .. }
            }
        ));
    }
}
