// Direct program invocation, used by the `command` installer source and by every
// post-install command. `~` and `$VARS` are expanded in the program and its
// arguments so configs can say `~/.foundry/bin/foundryup`.

use crate::libs::process::Invocation;
use crate::libs::utilities::path_helpers::expand_str;
use crate::schemas::steps::CommandSpec;

pub(crate) fn plan(spec: &CommandSpec) -> Invocation {
    let args: Vec<String> = spec.args.iter().map(|arg| expand_str(arg)).collect();
    Invocation::new(&expand_str(&spec.program), args.as_slice())
}
