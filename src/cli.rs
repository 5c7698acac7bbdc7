// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::HostCheckMethod;

#[derive(Parser, Debug)]
#[command(
    name = "sftpc",
    version,
    about = "Batch SFTP client - scripted file transfer over SSH",
    long_about = "sftpc is a batch-oriented SFTP client for scripted file transfers.\nEvery invocation opens one SSH connection, runs a single operation (or one batch\nover the same connection), and disconnects. Authentication uses a private key\nfile, in-memory key material, or a password; secrets are read from environment\nvariables so the tool never prompts.",
    after_help = "EXAMPLES:\n  List a remote directory:   sftpc -H sftp.example.com -u deploy list /var/www\n  Upload one file:           sftpc -s staging upload site.tar.gz /srv/releases/site.tar.gz\n  Upload many into a dir:    sftpc -s staging upload a.css b.css /srv/static/\n  Download a file:           sftpc -s prod download /var/log/app.log ./app.log\n  Delete several files:      sftpc -s prod delete old1.log old2.log\n  Create a directory:        sftpc -s prod mkdir /srv/releases/v42\n\nConnection settings resolve as: command line > server profile > config defaults."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        help = "Configuration file path [default: ~/.config/sftpc/config.yaml]\nThe default location is used only when the file exists; a path given\nhere must exist"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 's',
        long,
        help = "Server profile name from the configuration file"
    )]
    pub server: Option<String>,

    #[arg(short = 'H', long, help = "Remote host name or address")]
    pub host: Option<String>,

    #[arg(short = 'p', long, help = "SSH port [default: 22]")]
    pub port: Option<u16>,

    #[arg(
        short = 'u',
        long,
        help = "Username for the SSH connection [default: $USER]"
    )]
    pub username: Option<String>,

    #[arg(
        long,
        value_name = "ENV_VAR",
        help = "Read the password from this environment variable\nUsed only when no private key is configured"
    )]
    pub password_env: Option<String>,

    #[arg(
        short = 'i',
        long,
        help = "SSH private key file path\nTakes precedence over in-memory key material and passwords"
    )]
    pub key_file: Option<PathBuf>,

    #[arg(
        long,
        value_name = "ENV_VAR",
        help = "Read PEM-encoded private key material from this environment variable\nUsed when no key file is configured; takes precedence over passwords"
    )]
    pub key_env: Option<String>,

    #[arg(
        long,
        value_name = "ENV_VAR",
        help = "Read the private key passphrase from this environment variable"
    )]
    pub key_passphrase_env: Option<String>,

    #[arg(
        long,
        value_name = "MODE",
        help = "Host key checking mode (off/known-hosts/<path>) [default: off]\n  off         - Accept any host key (batch-transfer default)\n  known-hosts - Check against ~/.ssh/known_hosts\n  <path>      - Check against the given known_hosts file"
    )]
    pub known_hosts: Option<HostCheckMethod>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Fail connection attempts that take longer than this [default: no limit]"
    )]
    pub connect_timeout: Option<u64>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "List a remote directory",
        long_about = "Lists the entries of a remote directory in the order the server returns them.\nThe current-directory entry (\".\") is omitted; \"..\" and hidden files are kept.\n\nExit codes: 0 (listed), 1 (failed)"
    )]
    List {
        #[arg(default_value = ".", help = "Remote directory to list")]
        directory: String,
    },

    #[command(
        about = "Upload local files to the remote host",
        long_about = "Uploads one or more local files over a single connection using SFTP.\nThe last path is the remote destination. With one source the destination is\ntaken literally (a trailing slash appends the source file name); with several\nsources it must be a directory and each file keeps its own name. Batch uploads\nstop at the first failure.\n\nRequirements: the remote SSH server must have the SFTP subsystem enabled.",
        after_help = "Examples:\n  sftpc upload app.tar.gz /srv/app.tar.gz   # Single file, exact target\n  sftpc upload app.tar.gz /srv/             # Single file into a directory\n  sftpc upload a.css b.css /srv/static/     # Several files into a directory"
    )]
    Upload {
        #[arg(
            required = true,
            num_args = 2..,
            value_name = "SOURCE... DEST",
            help = "Local source file(s) followed by the remote destination"
        )]
        paths: Vec<String>,
    },

    #[command(
        about = "Download remote files from the remote host",
        long_about = "Downloads one or more remote files over a single connection using SFTP.\nThe last path is the local destination. With one source the destination is\ntaken literally (an existing directory or trailing slash appends the source\nfile name); with several sources it must be a directory. Batch downloads stop\nat the first failure.",
        after_help = "Examples:\n  sftpc download /var/log/app.log ./app.log   # Single file, exact target\n  sftpc download /var/log/app.log ./logs/     # Single file into a directory\n  sftpc download a.log b.log ./logs/          # Several files into a directory"
    )]
    Download {
        #[arg(
            required = true,
            num_args = 2..,
            value_name = "SOURCE... DEST",
            help = "Remote source file(s) followed by the local destination"
        )]
        paths: Vec<String>,
    },

    #[command(
        about = "Delete remote files",
        long_about = "Deletes one or more remote files over a single connection.\nA single path must exist; deleting a missing file is an error. With several\npaths every one is attempted even when earlier ones fail, and the command\nreports which paths could not be deleted.\n\nExit codes: 0 (all deleted), 1 (any failures)"
    )]
    Delete {
        #[arg(required = true, help = "Remote file path(s) to delete")]
        paths: Vec<String>,
    },

    #[command(
        about = "Create a remote directory",
        long_about = "Creates a directory on the remote host. The parent must exist and the\ndirectory itself must not; there is no mkdir -p behavior."
    )]
    Mkdir {
        #[arg(help = "Remote directory to create")]
        directory: String,
    },
}
