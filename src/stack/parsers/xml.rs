use roxmltree::{Document, Node};
use std::collections::BTreeMap;

const SPRING_BOOT_GROUP: &str = "org.springframework.boot";

/// Maven coordinates of a parent or dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coordinates {
    pub group_id: Option<String>,
    pub version: Option<String>,
}

/// The parts of `pom.xml` detection needs.
#[derive(Debug, Clone, Default)]
pub struct PomXml {
    pub coordinates: Coordinates,
    pub parent: Option<Coordinates>,
    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<Coordinates>,
}

impl PomXml {
    pub fn parse(content: &str) -> Result<Self, String> {
        let doc = Document::parse(content).map_err(|e| e.to_string())?;
        let root = doc.root_element();
        if !root.has_tag_name("project") {
            return Err(format!(
                "expected <project> root element, found <{}>",
                root.tag_name().name()
            ));
        }

        let mut pom = PomXml {
            coordinates: coordinates(root),
            ..Default::default()
        };

        for child in root.children().filter(Node::is_element) {
            match child.tag_name().name() {
                "parent" => pom.parent = Some(coordinates(child)),
                "properties" => {
                    for prop in child.children().filter(Node::is_element) {
                        if let Some(value) = text(prop) {
                            pom.properties
                                .insert(prop.tag_name().name().to_string(), value);
                        }
                    }
                }
                "dependencies" => {
                    pom.dependencies.extend(
                        child
                            .children()
                            .filter(|n| n.has_tag_name("dependency"))
                            .map(coordinates),
                    );
                }
                _ => {}
            }
        }

        Ok(pom)
    }

    /// Spring Boot parent POM or any dependency from the Spring Boot group.
    pub fn is_spring_boot(&self) -> bool {
        let parent = self
            .parent
            .as_ref()
            .is_some_and(|p| p.group_id.as_deref() == Some(SPRING_BOOT_GROUP));
        parent
            || self
                .dependencies
                .iter()
                .any(|d| d.group_id.as_deref() == Some(SPRING_BOOT_GROUP))
    }

    pub fn java_version(&self) -> Option<&str> {
        ["java.version", "maven.compiler.release", "maven.compiler.source"]
            .iter()
            .find_map(|key| self.properties.get(*key))
            .map(String::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.coordinates
            .version
            .as_deref()
            .or_else(|| self.parent.as_ref().and_then(|p| p.version.as_deref()))
    }
}

fn coordinates(node: Node) -> Coordinates {
    let mut coords = Coordinates::default();
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "groupId" => coords.group_id = text(child),
            "version" => coords.version = text(child),
            _ => {}
        }
    }
    coords
}

fn text(node: Node) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPRING_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <parent>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-starter-parent</artifactId>
        <version>3.2.0</version>
    </parent>
    <groupId>com.example</groupId>
    <artifactId>demo</artifactId>
    <version>0.0.1-SNAPSHOT</version>
    <properties>
        <java.version>17</java.version>
    </properties>
    <dependencies>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-web</artifactId>
        </dependency>
        <dependency>
            <groupId>org.postgresql</groupId>
            <artifactId>postgresql</artifactId>
            <scope>runtime</scope>
        </dependency>
    </dependencies>
</project>"#;

    #[test]
    fn test_parse_spring_pom() {
        let pom = PomXml::parse(SPRING_POM).unwrap();

        assert_eq!(pom.coordinates.group_id.as_deref(), Some("com.example"));
        assert_eq!(pom.version(), Some("0.0.1-SNAPSHOT"));
        assert_eq!(pom.java_version(), Some("17"));
        assert!(pom.is_spring_boot());
        assert_eq!(pom.dependencies.len(), 2);
    }

    #[test]
    fn test_plain_pom() {
        let pom = PomXml::parse(
            r#"<project>
                <groupId>com.example</groupId>
                <artifactId>lib</artifactId>
                <properties><maven.compiler.release>21</maven.compiler.release></properties>
            </project>"#,
        )
        .unwrap();

        assert!(!pom.is_spring_boot());
        assert_eq!(pom.java_version(), Some("21"));
        assert_eq!(pom.version(), None);
    }

    #[test]
    fn test_malformed_pom() {
        assert!(PomXml::parse("<project><groupId>x</project>").is_err());
    }

    #[test]
    fn test_wrong_root_element() {
        let err = PomXml::parse("<settings></settings>").unwrap_err();
        assert!(err.contains("<project>"));
    }
}
