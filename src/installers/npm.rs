// npm installer: global packages such as Yarn, Hardhat, Truffle, Ganache and
// NEAR CLI. Steps using it should require `command:npm`, otherwise a machine
// without Node.js would fail to start `npm` at all.

use crate::libs::process::Invocation;

pub(crate) fn plan(package: &str) -> Vec<Invocation> {
    vec![Invocation::new("npm", &["install", "-g", package])]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_globally() {
        assert_eq!(plan("hardhat")[0].command_line(), "npm install -g hardhat");
    }
}
