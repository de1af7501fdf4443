//! Rules shared by both dialects: comments, annotations, type references and attributes.

use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while, take_while1},
    character::complete::{multispace0, multispace1, satisfy, space0, space1},
    combinator::{cut, eof, map, opt, recognize, verify},
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
};

use super::{expect, literal, repeated_until, GrammarError, PResult};
use crate::{
    model::{AnnotationProperties, Annotations},
    parse_tree::{ParsedAttribute, ParsedAttributeType},
};

pub(super) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub(super) fn identifier(input: &str) -> PResult<&str> {
    expect(
        "identifier",
        recognize(pair(
            satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
            take_while(is_identifier_char),
        )),
    )(input)
}

pub(super) fn end_of_input(input: &str) -> PResult<&str> {
    expect("EOF", eof)(input)
}

fn comment_line(input: &str) -> PResult<String> {
    let (input, _) = literal("#")(input)?;
    let (input, text) = take_till(|c| c == '\n')(input)?;
    Ok((input, text.trim().to_string()))
}

/// Whitespace and comments that belong to nothing.
pub(super) fn blank(input: &str) -> PResult<()> {
    map(many0(alt((multispace1, recognize(comment_line)))), |_| ())(input)
}

/// Like [`blank`], additionally skipping commas.
pub(super) fn blank_or_commas(input: &str) -> PResult<()> {
    map(
        many0(alt((multispace1, literal(","), recognize(comment_line)))),
        |_| (),
    )(input)
}

fn annotation_value(input: &str) -> PResult<String> {
    expect(
        "annotation value",
        alt((
            map(
                preceded(
                    literal("\""),
                    cut(terminated(take_till(|c| c == '"' || c == '\n'), literal("\""))),
                ),
                str::to_string,
            ),
            map(take_while1(|c: char| !c.is_whitespace()), str::to_string),
        )),
    )(input)
}

fn annotation_property(input: &str) -> PResult<(String, String)> {
    map(
        separated_pair(identifier, literal("="), cut(annotation_value)),
        |(key, value)| (key.to_string(), value),
    )(input)
}

/// `%name key=value key2="quoted value"`, all on one line.
fn annotation(input: &str) -> PResult<(String, AnnotationProperties)> {
    let (input, _) = literal("%")(input)?;
    let (input, name) = cut(identifier)(input)?;
    let (input, properties) = many0(preceded(space1, annotation_property))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, (name.to_string(), properties.into_iter().collect())))
}

enum PreambleLine {
    Comment(String),
    Annotation(String, AnnotationProperties),
}

/// Comment and annotation lines leading a declaration, in any interleaving. Comments keep
/// their order; repeated annotations are grouped by name.
pub(super) fn preamble(input: &str) -> PResult<(Vec<String>, Annotations)> {
    let (input, lines) = many0(terminated(
        alt((
            map(comment_line, PreambleLine::Comment),
            map(annotation, |(name, properties)| {
                PreambleLine::Annotation(name, properties)
            }),
        )),
        multispace0,
    ))(input)?;

    let mut comments = Vec::new();
    let mut annotations = Annotations::new();
    for line in lines {
        match line {
            PreambleLine::Comment(text) => comments.push(text),
            PreambleLine::Annotation(name, properties) => {
                annotations.entry(name).or_default().push(properties)
            }
        }
    }
    Ok((input, (comments, annotations)))
}

fn flag_list<'a>(keyword: &'static str) -> impl FnMut(&'a str) -> PResult<'a, Vec<String>> {
    move |input: &'a str| {
        let (input, _) = literal(keyword)(input)?;
        let (input, _) = multispace0(input)?;
        let (input, _) = literal("(")(input)?;
        cut(terminated(
            delimited(
                multispace0,
                separated_list0(
                    tuple((multispace0, literal(","), multispace0)),
                    map(identifier, str::to_string),
                ),
                multispace0,
            ),
            literal(")"),
        ))(input)
    }
}

/// Any number of `includes(...)` / `excludes(...)` sections, in any order.
pub(super) fn includes_and_excludes(input: &str) -> PResult<(Vec<String>, Vec<String>)> {
    let (input, sections) = many0(preceded(
        multispace0,
        alt((
            map(flag_list("includes"), |flags| (true, flags)),
            map(flag_list("excludes"), |flags| (false, flags)),
        )),
    ))(input)?;

    let mut includes = Vec::new();
    let mut excludes = Vec::new();
    for (is_include, mut flags) in sections {
        if is_include {
            includes.append(&mut flags);
        } else {
            excludes.append(&mut flags);
        }
    }
    Ok((input, (includes, excludes)))
}

/// `Name includes(A, B) excludes(C)`.
pub(super) fn type_name_section(input: &str) -> PResult<(String, Vec<String>, Vec<String>)> {
    let (input, name) = identifier(input)?;
    let (input, (includes, excludes)) = includes_and_excludes(input)?;
    Ok((input, (name.to_string(), includes, excludes)))
}

enum AngleBrackets {
    Generics(Vec<ParsedAttributeType>),
    Protocol(String),
}

fn generic_argument(input: &str) -> PResult<ParsedAttributeType> {
    expect(
        "pointer type",
        verify(attribute_type, |type_: &ParsedAttributeType| {
            type_.is_pointer
        }),
    )(input)
}

fn angle_brackets(input: &str) -> PResult<AngleBrackets> {
    delimited(
        terminated(literal("<"), multispace0),
        cut(alt((
            map(
                separated_list1(
                    tuple((multispace0, literal(","), multispace0)),
                    generic_argument,
                ),
                AngleBrackets::Generics,
            ),
            map(identifier, |protocol| {
                AngleBrackets::Protocol(protocol.to_string())
            }),
        ))),
        cut(preceded(multispace0, literal(">"))),
    )(input)
}

/// C scalars spelled with several words, longest first so `unsigned long long` is not cut short.
const MULTI_WORD_SCALARS: &[&str] = &[
    "unsigned long long",
    "unsigned short",
    "unsigned char",
    "unsigned long",
    "unsigned int",
    "signed char",
    "long double",
    "long long",
];

/// The input left after `spelling`, whose words may be separated by any run of spaces.
fn spelled<'a>(input: &'a str, spelling: &str) -> Option<&'a str> {
    let mut words = spelling.split(' ');
    let (mut rest, first) = identifier(input).ok()?;
    if Some(first) != words.next() {
        return None;
    }
    for word in words {
        let (after_space, _) = space1::<_, GrammarError>(rest).ok()?;
        let (after_word, found) = identifier(after_space).ok()?;
        if found != word {
            return None;
        }
        rest = after_word;
    }
    Some(rest)
}

/// `unsigned int`, `long long` and friends, normalized to single spaces.
fn multi_word_scalar(input: &str) -> PResult<&str> {
    MULTI_WORD_SCALARS
        .iter()
        .find_map(|spelling| spelled(input, spelling).map(|rest| (rest, *spelling)))
        .ok_or_else(|| nom::Err::Error(GrammarError::expected(input, "identifier")))
}

/// `Identifier[<Generics-or-Protocol>][(Underlying)][*]`
pub(super) fn attribute_type(input: &str) -> PResult<ParsedAttributeType> {
    let (input, name) = alt((multi_word_scalar, identifier))(input)?;
    let (input, angle_brackets) = opt(preceded(space0, angle_brackets))(input)?;
    let (input, underlying_type) = opt(preceded(
        space0,
        delimited(
            literal("("),
            cut(delimited(space0, identifier, space0)),
            cut(literal(")")),
        ),
    ))(input)?;
    let (input, star) = opt(preceded(space0, literal("*")))(input)?;

    let mut reference = name.to_string();
    let mut generics = Vec::new();
    let mut conforming_protocol = None;
    match angle_brackets {
        Some(AngleBrackets::Generics(arguments)) => {
            let spelled: Vec<&str> = arguments.iter().map(|a| a.reference.as_str()).collect();
            reference.push_str(&format!("<{}>", spelled.join(", ")));
            generics = arguments;
        }
        Some(AngleBrackets::Protocol(protocol)) => {
            reference.push_str(&format!("<{protocol}>"));
            conforming_protocol = Some(protocol);
        }
        None => {}
    }
    if star.is_some() {
        reference.push('*');
    }

    Ok((
        input,
        ParsedAttributeType {
            name: name.to_string(),
            reference,
            underlying_type: underlying_type.map(str::to_string),
            conforming_protocol,
            generics,
            is_pointer: star.is_some() || name == "id",
        },
    ))
}

/// Comment and annotation lines, then `Type [*] name [;]`.
pub(super) fn attribute(input: &str) -> PResult<ParsedAttribute> {
    let (input, (comments, annotations)) = preamble(input)?;
    let (input, type_) = attribute_type(input)?;
    let (input, _) = space0(input)?;
    let (input, name) = cut(identifier)(input)?;
    let (input, _) = opt(preceded(space0, literal(";")))(input)?;
    Ok((
        input,
        ParsedAttribute {
            comments,
            annotations,
            name: name.to_string(),
            type_,
        },
    ))
}

/// `{ attribute* }`. Once the brace is open the body has to parse.
pub(super) fn attribute_body(input: &str) -> PResult<Vec<ParsedAttribute>> {
    preceded(
        literal("{"),
        cut(repeated_until(
            preceded(multispace0, attribute),
            preceded(blank, literal("}")),
        )),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_comments_in_order() {
        let (rest, (comments, annotations)) = preamble("# first\n  # second\nRMFoo").unwrap();
        assert_eq!(comments, vec!["first", "second"]);
        assert!(annotations.is_empty());
        assert_eq!(rest, "RMFoo");
    }

    #[test]
    fn comments_and_annotations_interleave() {
        let (rest, (comments, annotations)) =
            preamble("# first\n%nullable\n# second\n%import file=A.h\nNSString *x").unwrap();
        assert_eq!(rest, "NSString *x");
        assert_eq!(comments, vec!["first", "second"]);
        assert!(annotations.contains_key("nullable"));
        assert_eq!(annotations["import"][0]["file"], "A.h");
    }

    #[test]
    fn repeated_annotations_accumulate() {
        let (rest, (_, annotations)) =
            preamble("%import file=A.h\n%import file=B.h library=\"My Lib\"\n%nullable\nx")
                .unwrap();
        assert_eq!(rest, "x");
        let imports = &annotations["import"];
        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0]["file"], "A.h");
        assert_eq!(imports[1]["file"], "B.h");
        assert_eq!(imports[1]["library"], "My Lib");
        assert_eq!(annotations["nullable"], vec![AnnotationProperties::new()]);
    }

    #[test]
    fn type_name_with_includes_and_excludes() {
        let (_, (name, includes, excludes)) =
            type_name_section("RMFoo includes(A, B ) excludes( C)").unwrap();
        assert_eq!(name, "RMFoo");
        assert_eq!(includes, vec!["A", "B"]);
        assert_eq!(excludes, vec!["C"]);
    }

    #[test]
    fn generic_attribute_type() {
        let (_, type_) = attribute_type("NSDictionary<NSString *, id> *").unwrap();
        assert_eq!(type_.name, "NSDictionary");
        assert_eq!(type_.reference, "NSDictionary<NSString*, id>*");
        assert_eq!(type_.generics.len(), 2);
        assert_eq!(type_.generics[1].name, "id");
        assert_eq!(type_.conforming_protocol, None);
    }

    #[test]
    fn protocol_attribute_type() {
        let (_, type_) = attribute_type("id<RMDelegate>").unwrap();
        assert_eq!(type_.reference, "id<RMDelegate>");
        assert_eq!(type_.conforming_protocol.as_deref(), Some("RMDelegate"));
        assert!(type_.generics.is_empty());
        assert!(type_.is_pointer);
    }

    #[test]
    fn underlying_attribute_type() {
        let (_, type_) = attribute_type("RMEnum(NSUInteger)").unwrap();
        assert_eq!(type_.reference, "RMEnum");
        assert_eq!(type_.underlying_type.as_deref(), Some("NSUInteger"));
        assert!(!type_.is_pointer);
    }

    #[test]
    fn star_may_be_attached_to_either_side() {
        for source in ["NSString *name", "NSString* name", "NSString * name;"] {
            let (_, attribute) = attribute(source).unwrap();
            assert_eq!(attribute.name, "name", "{source}");
            assert_eq!(attribute.type_.reference, "NSString*", "{source}");
        }
    }

    #[test]
    fn multi_word_scalars() {
        let (_, parsed) = attribute("unsigned   long long count;").unwrap();
        assert_eq!(parsed.type_.name, "unsigned long long");
        assert_eq!(parsed.type_.reference, "unsigned long long");
        assert_eq!(parsed.name, "count");
        assert!(!parsed.type_.is_pointer);

        let (_, parsed) = attribute("unsigned int count").unwrap();
        assert_eq!(parsed.type_.name, "unsigned int");

        // A lone `long` is still a type of its own.
        let (_, parsed) = attribute("long count").unwrap();
        assert_eq!(parsed.type_.name, "long");
        assert_eq!(parsed.name, "count");
    }

    #[test]
    fn annotation_after_comment_belongs_to_the_attribute() {
        let (_, parsed) = attribute("%nullable\n# doc\nNSString *x").unwrap();
        assert_eq!(parsed.comments, vec!["doc"]);
        assert!(parsed.annotations.contains_key("nullable"));
        assert_eq!(parsed.name, "x");
    }

    #[test]
    fn attribute_without_name_is_a_failure() {
        assert!(matches!(attribute("NSString *}"), Err(nom::Err::Failure(_))));
    }
}
