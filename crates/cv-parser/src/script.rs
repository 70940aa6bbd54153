use cv_core::{ConversationError, Next, Script, State, StateId, START_STATE_ID};

use crate::xml::{parse_xml_document, XmlElementNode};

const ROOT_ELEMENT: &str = "conversation";
const STATE_ELEMENT: &str = "state";

pub fn compile_xml_script(source: &str) -> Result<Script, ConversationError> {
    let document = parse_xml_document(source)?;
    let root = document.root;
    if root.name != ROOT_ELEMENT {
        return Err(ConversationError::new(
            "PARSE_XML_ROOT",
            format!(
                "Root element must be <{}>, found <{}> at line {}.",
                ROOT_ELEMENT, root.name, root.line
            ),
        ));
    }

    let mut states = Vec::new();
    for element in root.child_elements() {
        if element.name != STATE_ELEMENT {
            return Err(unknown_element(element, ROOT_ELEMENT));
        }
        states.push(compile_state(element)?);
    }

    Script::new(states)
}

fn compile_state(element: &XmlElementNode) -> Result<State, ConversationError> {
    let id = match element.attribute("id") {
        Some(raw) => parse_state_id(raw, "id", element.line)?,
        None => {
            return Err(ConversationError::new(
                "PARSE_STATE_ID_MISSING",
                format!("<state> at line {} has no id attribute.", element.line),
            ))
        }
    };

    let mut text = element.attribute("text").map(ToString::to_string);
    let mut next = None;

    for child in element.child_elements() {
        match child.name.as_str() {
            "text" => {
                if text.is_some() {
                    return Err(ConversationError::at_state(
                        "PARSE_STATE_TEXT_DUPLICATE",
                        format!("State {} declares its text more than once.", id),
                        id,
                    ));
                }
                text = Some(child.text_content().trim().to_string());
            }
            "next" => {
                if next.is_some() {
                    return Err(ConversationError::at_state(
                        "PARSE_STATE_NEXT_DUPLICATE",
                        format!("State {} declares more than one <next>.", id),
                        id,
                    ));
                }
                next = Some(compile_next(child).map_err(|error| error.with_state_id(id))?);
            }
            _ => return Err(unknown_element(child, STATE_ELEMENT).with_state_id(id)),
        }
    }

    Ok(State {
        id,
        before: attribute_or_empty(element, "before"),
        text: text.unwrap_or_default(),
        input: attribute_or_empty(element, "input"),
        after: attribute_or_empty(element, "after"),
        next: next.unwrap_or_default(),
    })
}

fn compile_next(element: &XmlElementNode) -> Result<Next, ConversationError> {
    let target = |name: &str| -> Result<StateId, ConversationError> {
        match element.attribute(name) {
            Some(raw) => parse_state_id(raw, name, element.line),
            None => Ok(START_STATE_ID),
        }
    };

    Ok(Next {
        right: target("right")?,
        right_if: attribute_or_empty(element, "right-if"),
        left: target("left")?,
    })
}

fn parse_state_id(raw: &str, attribute: &str, line: u32) -> Result<StateId, ConversationError> {
    raw.trim().parse::<StateId>().map_err(|_| {
        ConversationError::new(
            "PARSE_STATE_ID_INVALID",
            format!(
                "Attribute {}=\"{}\" at line {} is not an integer state id.",
                attribute, raw, line
            ),
        )
    })
}

fn attribute_or_empty(element: &XmlElementNode, name: &str) -> String {
    element.attribute(name).unwrap_or_default().to_string()
}

fn unknown_element(element: &XmlElementNode, parent: &str) -> ConversationError {
    ConversationError::new(
        "PARSE_XML_UNKNOWN_ELEMENT",
        format!(
            "Unexpected <{}> inside <{}> at line {}.",
            element.name, parent, element.line
        ),
    )
}
