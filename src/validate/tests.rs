// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::dsl::fixtures::MappedParser;
use crate::dsl::{AstEntity, ParseFailure, SourceLocation};

use super::{validate, ValidationOutcome};

#[test]
fn empty_text_is_clean_without_parsing() {
    // A parser that fails on everything; it must never be consulted.
    let parser = MappedParser::new().err("", ParseFailure::new("Error", "must not run"));
    assert_eq!(validate(&parser, ""), ValidationOutcome::Clean);
}

#[test]
fn counted_intents_are_clean() {
    let source = "%[greet]('training': '100')\n    hi";
    let parser = MappedParser::new().intent(source, "greet", true);
    assert_eq!(validate(&parser, source), ValidationOutcome::Clean);
}

#[test]
fn uncounted_intent_warns_and_names_first_intent() {
    let source = "%[greet]('training':'-')\n    hi";
    let parser = MappedParser::new().ok(
        source,
        vec![
            AstEntity::AliasDefinition { key: "hi".to_owned() },
            AstEntity::IntentDefinition { key: "greet".to_owned(), args: None },
            AstEntity::IntentDefinition { key: "bye".to_owned(), args: None },
        ],
    );

    let ValidationOutcome::Warning(message) = validate(&parser, source) else {
        panic!("expected warning");
    };
    assert_eq!(
        message,
        "Warning: Limit the number of generated examples for intents. \
         E.g.: %[greet]('training': '100')"
    );
}

#[test]
fn located_failure_formats_name_description_line_column() {
    let source = "%%% nonsense";
    let parser = MappedParser::new().err(
        source,
        ParseFailure::new("SyntaxError", "Expected intent definition but found \"%\".")
            .with_location(SourceLocation { line: 3, column: 5 }),
    );

    assert_eq!(
        validate(&parser, source),
        ValidationOutcome::Error(
            "SyntaxError: Expected intent definition but found \"%\". Line: 3, Column: 5"
                .to_owned()
        )
    );
}

#[test]
fn unlocated_failure_uses_generic_error_text() {
    let source = "broken";
    let parser =
        MappedParser::new().err(source, ParseFailure::new("Error", "something went wrong"));
    assert_eq!(
        validate(&parser, source),
        ValidationOutcome::Error("Error: something went wrong".to_owned())
    );
}

#[test]
fn validation_is_deterministic() {
    let source = "%[greet]('training':'-')";
    let parser = MappedParser::new().ok(
        source,
        vec![AstEntity::IntentDefinition { key: "greet".to_owned(), args: None }],
    );
    let first = validate(&parser, source);
    let second = validate(&parser, source);
    assert_eq!(first, second);
}

#[test]
fn slot_args_do_not_trigger_the_intent_warning() {
    let source = "@[city]('default': 'x')";
    let mut args = BTreeMap::new();
    args.insert("default".to_owned(), "x".to_owned());
    let parser = MappedParser::new()
        .ok(source, vec![AstEntity::SlotDefinition { key: "city".to_owned(), args: Some(args) }]);
    assert_eq!(validate(&parser, source), ValidationOutcome::Clean);
}
