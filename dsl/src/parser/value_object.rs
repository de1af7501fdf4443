use nom::character::complete::multispace0;

use super::{
    common::{attribute_body, blank, end_of_input, preamble, type_name_section},
    PResult,
};
use crate::parse_tree::ParsedValueObject;

pub(super) fn value_object(input: &str) -> PResult<ParsedValueObject> {
    let (input, _) = multispace0(input)?;
    let (input, (comments, annotations)) = preamble(input)?;
    let (input, (type_name, includes, excludes)) = type_name_section(input)?;
    let (input, _) = multispace0(input)?;
    let (input, attributes) = attribute_body(input)?;
    let (input, _) = blank(input)?;
    let (input, _) = end_of_input(input)?;
    Ok((
        input,
        ParsedValueObject {
            comments,
            annotations,
            type_name,
            includes,
            excludes,
            attributes,
        },
    ))
}
