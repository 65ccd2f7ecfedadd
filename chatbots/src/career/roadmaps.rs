//! Career roadmaps and the `get_career_roadmap` tool.

use agentic::error::ToolError;
use agentic::tool::{Tool, ToolContext, ToolOutput, parse_params};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;

/// Skills, courses and a rough timeline for one career.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapRecord {
    pub skills: &'static [&'static str],
    pub courses: &'static [&'static str],
    pub timeline: &'static str,
}

/// Returned for any career not in [`ROADMAPS`].
pub static DEFAULT_ROADMAP: RoadmapRecord = RoadmapRecord {
    skills: &["Python", "Basic IT skills", "Research required"],
    courses: &["Explore Coursera, edX, Udemy", "FreeCodeCamp", "Kaggle Tutorials"],
    timeline: "Varies by career",
};

/// Roadmaps keyed by lowercase career name.
pub static ROADMAPS: Lazy<HashMap<&'static str, RoadmapRecord>> = Lazy::new(|| {
    HashMap::from([
        (
            "machine learning engineer",
            RoadmapRecord {
                skills: &["Python", "TensorFlow", "PyTorch", "Machine Learning", "Deep Learning", "Mathematics"],
                courses: &["Deep Learning Specialization (Coursera)", "Scaler AI & ML Course", "Introduction to AI (IBM SkillsBuild)"],
                timeline: "6-12 months for basics; 1-2 years for proficiency",
            },
        ),
        (
            "data scientist",
            RoadmapRecord {
                skills: &["Python", "R", "SQL", "Machine Learning", "Statistics", "Data Visualization"],
                courses: &["Data Science (Coursera)", "Python for Data Science (Udemy)", "Data Engineering Fundamentals (edX)"],
                timeline: "6-18 months based on math background",
            },
        ),
        (
            "cybersecurity analyst",
            RoadmapRecord {
                skills: &["Threat Analysis", "Ethical Hacking", "Python", "Networking", "AI-powered Cybersecurity"],
                courses: &["Google IT Support (Coursera)", "Complete Cyber Security Course (Udemy)", "Cisco Networking Academy"],
                timeline: "6-12 months for entry-level; 1-2 years for advanced",
            },
        ),
        (
            "ui/ux designer",
            RoadmapRecord {
                skills: &["Figma", "User Research", "Wireframing", "UI Design", "Basic JavaScript"],
                courses: &["Google UX Design (Coursera)", "UI/UX Design Bootcamp (Udemy)", "FreeCodeCamp UI Design"],
                timeline: "3-6 months for basics; 1 year for proficiency",
            },
        ),
        (
            "cloud computing",
            RoadmapRecord {
                skills: &["Kubernetes", "Docker", "AWS", "Azure", "Linux", "CI/CD", "Networking"],
                courses: &["Google Cloud DevOps Engineer (Coursera)", "Kubernetes for Beginners (Udemy)", "Certified Kubernetes Administrator (Linux Foundation)"],
                timeline: "3-6 months for basics; 6-12 months for proficiency",
            },
        ),
        (
            "agentic ai",
            RoadmapRecord {
                skills: &["Python", "LangChain", "LLM APIs", "Reinforcement Learning", "Prompt Engineering", "Workflow Automation"],
                courses: &["Building AI Agents with LangChain (Coursera)", "Mastering LLMs (Udemy)", "Reinforcement Learning Specialization (DeepLearning.AI)"],
                timeline: "6-12 months for basics; 1-2 years for proficiency",
            },
        ),
        (
            "freelancing",
            RoadmapRecord {
                skills: &["Graphic Design", "Writing", "Virtual Assistance", "Agentic AI", "Digital Marketing"],
                courses: &["Graphic Design (Coursera)", "Writing Essentials (Udemy)", "Virtual Assistant Training (Udemy)", "Building AI Agents (Coursera)"],
                timeline: "3-6 months for basics; 1-2 months for first client",
            },
        ),
    ])
});

/// Roadmap for `career` (any case), or the default roadmap.
pub fn roadmap_for(career: &str) -> &'static RoadmapRecord {
    ROADMAPS
        .get(career.to_lowercase().as_str())
        .unwrap_or(&DEFAULT_ROADMAP)
}

#[derive(Deserialize)]
struct RoadmapParams {
    career: String,
}

/// Tool exposing [`roadmap_for`] to the model.
pub struct GetCareerRoadmap;

#[async_trait]
impl Tool for GetCareerRoadmap {
    fn name(&self) -> &str {
        "get_career_roadmap"
    }

    fn description(&self) -> &str {
        "Generates a skill-building roadmap for a given career in 2025."
    }

    fn input_schema(&self) -> &Value {
        static SCHEMA: Lazy<Value> = Lazy::new(|| {
            json!({
                "type": "object",
                "properties": {
                    "career": {
                        "type": "string",
                        "description": "Career name, e.g. \"data scientist\" or \"freelancing\""
                    }
                },
                "required": ["career"]
            })
        });
        &SCHEMA
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> Result<ToolOutput, ToolError> {
        let params: RoadmapParams = parse_params(self.name(), params)?;
        tracing::debug!(career = %params.career, "roadmap lookup");
        ToolOutput::json(roadmap_for(&params.career))
    }
}
