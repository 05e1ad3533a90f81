//! POM file parsing.
//!
//! Reads the subset of the Maven 4.0.0 model the tool consumes:
//! dependency declarations (plain and managed), properties, and the
//! parent reference.

use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use jimports_util::errors::JimportsError;

use crate::coordinate::MavenCoordinate;

/// The raw fields read from one POM file.
#[derive(Debug, Clone, Default)]
pub struct Pom {
    pub dependencies: Vec<MavenCoordinate>,
    pub dependency_management: Vec<MavenCoordinate>,
    pub properties: BTreeMap<String, String>,
    pub parent: Option<ParentRef>,
}

/// Reference to a parent POM.
#[derive(Debug, Clone, Default)]
pub struct ParentRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub relative_path: Option<String>,
}

/// Parse a POM XML string.
pub fn parse_pom(xml: &str) -> miette::Result<Pom> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pom = Pom::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    let mut current_dep: Option<MavenCoordinate> = None;
    let mut current_parent: Option<ParentRef> = None;
    let mut in_dep_mgmt = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                path.push(tag);
                text_buf.clear();

                match path_context(&path).as_str() {
                    "project>dependencies>dependency" => {
                        in_dep_mgmt = false;
                        current_dep = Some(MavenCoordinate::new("", ""));
                    }
                    "project>dependencyManagement>dependencies>dependency" => {
                        in_dep_mgmt = true;
                        current_dep = Some(MavenCoordinate::new("", ""));
                    }
                    "project>parent" => {
                        current_parent = Some(ParentRef::default());
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path_context(&path);
                let depth = path.len();

                // Properties: <project><properties><key>value</key>
                if depth == 3 && path.get(1).map(|s| s.as_str()) == Some("properties") {
                    let prop_name = path.last().cloned().unwrap_or_default();
                    pom.properties.insert(prop_name, text_buf.clone());
                }

                if let Some(ref mut dep) = current_dep {
                    match path.last().map(|s| s.as_str()) {
                        Some("groupId") if ctx.ends_with(">dependency>groupId") => {
                            dep.group_id = text_buf.clone();
                        }
                        Some("artifactId") if ctx.ends_with(">dependency>artifactId") => {
                            dep.artifact_id = text_buf.clone();
                        }
                        Some("version") if ctx.ends_with(">dependency>version") => {
                            dep.version = Some(text_buf.clone());
                        }
                        Some("type") if ctx.ends_with(">dependency>type") => {
                            dep.type_ = text_buf.clone();
                        }
                        Some("classifier") if ctx.ends_with(">dependency>classifier") => {
                            dep.classifier = Some(text_buf.clone());
                        }
                        Some("scope") if ctx.ends_with(">dependency>scope") => {
                            dep.scope = text_buf.clone();
                        }
                        Some("optional") if ctx.ends_with(">dependency>optional") => {
                            dep.optional = text_buf.trim() == "true";
                        }
                        _ => {}
                    }

                    if ctx == "project>dependencies>dependency"
                        || ctx == "project>dependencyManagement>dependencies>dependency"
                    {
                        if let Some(dep) = current_dep.take() {
                            if in_dep_mgmt {
                                pom.dependency_management.push(dep);
                            } else {
                                pom.dependencies.push(dep);
                            }
                        }
                    }
                }

                if let Some(ref mut parent) = current_parent {
                    match path.last().map(|s| s.as_str()) {
                        Some("groupId") if ctx == "project>parent>groupId" => {
                            parent.group_id = text_buf.clone();
                        }
                        Some("artifactId") if ctx == "project>parent>artifactId" => {
                            parent.artifact_id = text_buf.clone();
                        }
                        Some("version") if ctx == "project>parent>version" => {
                            parent.version = text_buf.clone();
                        }
                        Some("relativePath") if ctx == "project>parent>relativePath" => {
                            parent.relative_path = Some(text_buf.clone());
                        }
                        _ => {}
                    }
                    if ctx == "project>parent" {
                        pom.parent = current_parent.take();
                    }
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => {
                // the reader does not validate this itself: a truncated
                // file ends in Eof with open elements still on the stack
                if let Some(open) = path.last() {
                    return Err(JimportsError::Generic {
                        message: format!("Failed to parse POM XML: unclosed element <{open}>"),
                    }
                    .into());
                }
                break;
            }
            Err(e) => {
                return Err(JimportsError::Generic {
                    message: format!("Failed to parse POM XML: {e}"),
                }
                .into());
            }
            _ => {}
        }
    }

    Ok(pom)
}

/// Build a context string from the current XML path for matching.
fn path_context(path: &[String]) -> String {
    path.join(">")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>org.example</groupId>
    <artifactId>my-lib</artifactId>
    <version>1.0.0</version>

    <properties>
        <guava.version>28.0-jre</guava.version>
    </properties>

    <dependencies>
        <dependency>
            <groupId>com.google.guava</groupId>
            <artifactId>guava</artifactId>
            <version>${guava.version}</version>
        </dependency>
        <dependency>
            <groupId>junit</groupId>
            <artifactId>junit</artifactId>
            <version>4.13.2</version>
            <scope>test</scope>
            <optional>true</optional>
        </dependency>
    </dependencies>
</project>"#;

    #[test]
    fn parse_dependencies_and_properties() {
        let pom = parse_pom(SIMPLE_POM).unwrap();
        assert_eq!(pom.dependencies.len(), 2);
        assert_eq!(pom.dependencies[0].group_id, "com.google.guava");
        assert_eq!(
            pom.dependencies[0].version.as_deref(),
            Some("${guava.version}")
        );
        assert_eq!(pom.dependencies[0].scope, "compile");
        assert_eq!(pom.dependencies[1].scope, "test");
        assert!(pom.dependencies[1].optional);
        assert_eq!(pom.properties.get("guava.version").unwrap(), "28.0-jre");
    }

    #[test]
    fn parse_dependency_management() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>com.google.guava</groupId>
                <artifactId>guava</artifactId>
                <version>32.0.0-jre</version>
                <type>pom</type>
                <classifier>sources</classifier>
            </dependency>
        </dependencies>
    </dependencyManagement>
</project>"#;
        let pom = parse_pom(xml).unwrap();
        assert!(pom.dependencies.is_empty());
        assert_eq!(pom.dependency_management.len(), 1);
        let managed = &pom.dependency_management[0];
        assert_eq!(managed.type_, "pom");
        assert_eq!(managed.classifier.as_deref(), Some("sources"));
    }

    #[test]
    fn parse_parent_with_relative_path() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <parent>
        <groupId>org.example</groupId>
        <artifactId>parent-pom</artifactId>
        <version>2.0.0</version>
        <relativePath>../parent</relativePath>
    </parent>
    <artifactId>child</artifactId>
</project>"#;
        let pom = parse_pom(xml).unwrap();
        let parent = pom.parent.unwrap();
        assert_eq!(parent.group_id, "org.example");
        assert_eq!(parent.artifact_id, "parent-pom");
        assert_eq!(parent.version, "2.0.0");
        assert_eq!(parent.relative_path.as_deref(), Some("../parent"));
    }

    #[test]
    fn parent_without_relative_path() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <parent>
        <groupId>org.example</groupId>
        <artifactId>parent-pom</artifactId>
        <version>2.0.0</version>
    </parent>
</project>"#;
        let pom = parse_pom(xml).unwrap();
        assert!(pom.parent.unwrap().relative_path.is_none());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        // truncated input: open elements remain at end of input
        assert!(parse_pom("<project><dependencies>").is_err());
        // mismatched end tag: rejected by the reader itself
        assert!(parse_pom("<project></wrong>").is_err());
    }
}
