use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{multispace0, multispace1, space0},
    combinator::{cut, map, opt},
    multi::many0,
    sequence::preceded,
};

use super::{
    common::{
        attribute_body, blank, blank_or_commas, end_of_input, identifier, includes_and_excludes,
        is_identifier_char, preamble, type_name_section,
    },
    literal, parse_attribute_type, repeated_until, GrammarError, PResult,
};
use crate::{
    model::Annotations,
    parse_tree::{ParsedAlgebraicType, ParsedAttribute, ParsedSubtype},
};

/// Annotation turning a bare subtype entry into a single-attribute subtype.
pub(crate) const SINGLE_ATTRIBUTE_SUBTYPE: &str = "singleAttributeSubtype";

type CollectionParts = (String, Vec<String>, Vec<String>, Vec<ParsedAttribute>);

/// `Name [includes(...)] [excludes(...)] { attribute* }`
///
/// The name may be empty here; unnamed subtypes are rejected during validation.
fn named_attribute_collection(input: &str) -> PResult<CollectionParts> {
    let (input, name) = take_while(is_identifier_char)(input)?;
    let (input, (includes, excludes)) = includes_and_excludes(input)?;
    let (input, _) = multispace0(input)?;
    let (input, attributes) = attribute_body(input)?;
    Ok((input, (name.to_string(), includes, excludes, attributes)))
}

/// A bare `Name`, i.e. a subtype without attributes.
fn empty_attribute_collection(input: &str) -> PResult<CollectionParts> {
    let (input, name) = identifier(input)?;
    let (input, (includes, excludes)) = includes_and_excludes(input)?;
    Ok((input, (name.to_string(), includes, excludes, Vec::new())))
}

fn single_attribute_subtype<'a>(
    input: &'a str,
    comments: Vec<String>,
    annotations: Annotations,
    attribute_type: Option<String>,
) -> PResult<'a, ParsedSubtype> {
    let (rest, name) = cut(identifier)(input)?;
    let (rest, _) = opt(preceded(space0, literal(";")))(rest)?;

    // Without an attributeType there is no payload; the translator reports the annotation.
    let single_attribute = match attribute_type {
        Some(attribute_type) => {
            let type_ = parse_attribute_type(&attribute_type).map_err(|_| {
                nom::Err::Failure(GrammarError::expected(
                    input,
                    "attributeType naming a valid attribute type",
                ))
            })?;
            Some(ParsedAttribute {
                comments: comments.clone(),
                annotations: annotations.clone(),
                name: name.to_string(),
                type_,
            })
        }
        None => None,
    };

    Ok((
        rest,
        ParsedSubtype {
            comments,
            annotations,
            name: name.to_string(),
            includes: Vec::new(),
            excludes: Vec::new(),
            attributes: Vec::new(),
            single_attribute,
        },
    ))
}

fn subtype(input: &str) -> PResult<ParsedSubtype> {
    let (input, (comments, annotations)) = preamble(input)?;

    if let Some(occurrences) = annotations.get(SINGLE_ATTRIBUTE_SUBTYPE) {
        let attribute_type = occurrences
            .last()
            .and_then(|properties| properties.get("attributeType"))
            .cloned();
        return single_attribute_subtype(input, comments, annotations, attribute_type);
    }

    let (input, (name, includes, excludes, attributes)) =
        alt((named_attribute_collection, empty_attribute_collection))(input)?;
    Ok((
        input,
        ParsedSubtype {
            comments,
            annotations,
            name,
            includes,
            excludes,
            attributes,
            single_attribute: None,
        },
    ))
}

/// Entries are separated by any mix of commas and whitespace, or simply adjacent.
fn separators(input: &str) -> PResult<()> {
    map(many0(alt((multispace1, literal(",")))), |_| ())(input)
}

fn subtype_list(input: &str) -> PResult<Vec<ParsedSubtype>> {
    preceded(
        literal("{"),
        repeated_until(
            preceded(separators, subtype),
            preceded(blank_or_commas, literal("}")),
        ),
    )(input)
}

pub(super) fn algebraic_type(input: &str) -> PResult<ParsedAlgebraicType> {
    let (input, _) = multispace0(input)?;
    let (input, (comments, annotations)) = preamble(input)?;
    let (input, (type_name, includes, excludes)) = type_name_section(input)?;
    let (input, _) = multispace0(input)?;
    let (input, subtypes) = subtype_list(input)?;
    let (input, _) = blank(input)?;
    let (input, _) = end_of_input(input)?;
    Ok((
        input,
        ParsedAlgebraicType {
            comments,
            annotations,
            type_name,
            includes,
            excludes,
            subtypes,
        },
    ))
}
