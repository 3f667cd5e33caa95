use crate::metadata::{ContentType, OpenGraphOverrides, PageMeta};
use folio_core::Locale;

/// Marketing pages that exist once per locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaticPage {
    Home,
    Resume,
    Project,
    Contact,
    Blog,
}

/// Localized metadata text for one page
struct PageText {
    title: &'static str,
    description: &'static str,
    og_title: &'static str,
    og_description: &'static str,
    kind: ContentType,
}

impl StaticPage {
    pub const ALL: [StaticPage; 5] = [
        StaticPage::Home,
        StaticPage::Resume,
        StaticPage::Project,
        StaticPage::Contact,
        StaticPage::Blog,
    ];

    /// Route below the locale prefix; the home page is the empty path
    pub fn path(self) -> &'static str {
        match self {
            StaticPage::Home => "",
            StaticPage::Resume => "/resume",
            StaticPage::Project => "/project",
            StaticPage::Contact => "/contact",
            StaticPage::Blog => "/blog",
        }
    }

    pub fn from_path(path: &str) -> Option<StaticPage> {
        let normalized = folio_core::config::normalize_path(path);
        StaticPage::ALL
            .into_iter()
            .find(|page| page.path() == normalized)
    }

    /// Metadata input for this page in `locale`
    pub fn page_meta(self, locale: Locale) -> PageMeta {
        let text = self.text(locale);
        PageMeta {
            title: Some(text.title.to_string()),
            description: Some(text.description.to_string()),
            open_graph: Some(OpenGraphOverrides {
                title: Some(text.og_title.to_string()),
                description: Some(text.og_description.to_string()),
                kind: Some(text.kind),
            }),
            ..PageMeta::default()
        }
    }

    fn text(self, locale: Locale) -> PageText {
        use ContentType::*;

        let (title, description, og_title, og_description, kind) = match (self, locale) {
            (StaticPage::Home, Locale::Ko) => (
                "홈",
                "UI디자인과 자바스크립트를 사랑하는 프론트엔드 개발자 강하은의 포트폴리오.",
                "Frontend Developer Haeun",
                "UI를 정확하게 구현하고 협업을 즐기는 프론트엔드 개발자 강하은의 포트폴리오.",
                Website,
            ),
            (StaticPage::Home, Locale::En) => (
                "Home",
                "Portfolio of Haeun, a frontend developer who loves UI design and JavaScript.",
                "Frontend Developer Haeun",
                "A frontend engineer who brings UI details to life and collaborates seamlessly.",
                Website,
            ),
            (StaticPage::Resume, Locale::Ko) => (
                "Resume",
                "프론트엔드 개발자 강하은의 경력, 기술 스택, 교육·자격 정보를 확인하세요.",
                "Haeun Resume",
                "에너지·공유주방·의료 서비스 경험과 다양한 UI 기술을 갖춘 프론트엔드 개발자입니다.",
                Profile,
            ),
            (StaticPage::Resume, Locale::En) => (
                "Resume",
                "Explore Haeun's frontend experience, skill set, education, and certifications.",
                "Haeun Resume",
                "Frontend engineer with experience across energy, shared kitchen, and healthcare services.",
                Profile,
            ),
            (StaticPage::Project, Locale::Ko) => (
                "Project",
                "실험 자동화, 온보딩 개선, 디자인 시스템 운영 등 대표 프로젝트를 소개합니다.",
                "Haeun Projects",
                "데이터 기반 실험, SaaS 온보딩, Design System Ops 사례를 확인하세요.",
                Article,
            ),
            (StaticPage::Project, Locale::En) => (
                "Projects",
                "Case studies covering experiment automation, onboarding redesign, and design system ops.",
                "Haeun Projects",
                "Explore experiment ops, SaaS onboarding, and design system automation work.",
                Article,
            ),
            (StaticPage::Contact, Locale::Ko) => (
                "Contact",
                "협업, 커피챗, 스피커 제안 등 문의 채널과 선호 협업 유형을 안내합니다.",
                "Haeun Contact",
                "프로젝트 제안과 협업 문의를 위한 채널 안내",
                Website,
            ),
            (StaticPage::Contact, Locale::En) => (
                "Contact",
                "Reach out for collaborations, coffee chats, or speaking invitations.",
                "Haeun Contact",
                "Preferred contact channels and collaboration styles.",
                Website,
            ),
            (StaticPage::Blog, Locale::Ko) => (
                "Blog",
                "실험 문화, 디자인 시스템, 협업 인사이트를 기록합니다.",
                "Haeun Blog",
                "프로덕트 디자인과 프런트엔드 실무 인사이트",
                Article,
            ),
            (StaticPage::Blog, Locale::En) => (
                "Blog",
                "Notes on experiment culture, design systems, and cross-functional collaboration.",
                "Haeun Blog",
                "Product design and frontend insights from real projects.",
                Article,
            ),
        };

        PageText {
            title,
            description,
            og_title,
            og_description,
            kind,
        }
    }
}

/// Route paths of every static page, home first
pub fn static_paths() -> impl Iterator<Item = &'static str> {
    StaticPage::ALL.into_iter().map(StaticPage::path)
}

/// Description of the blog index, used when a post has no summary
pub fn blog_description(locale: Locale) -> String {
    StaticPage::Blog.text(locale).description.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_paths() {
        let paths: Vec<&str> = static_paths().collect();
        assert_eq!(paths, vec!["", "/resume", "/project", "/contact", "/blog"]);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(StaticPage::from_path(""), Some(StaticPage::Home));
        assert_eq!(StaticPage::from_path("/"), Some(StaticPage::Home));
        assert_eq!(StaticPage::from_path("/blog"), Some(StaticPage::Blog));
        assert_eq!(StaticPage::from_path("contact"), Some(StaticPage::Contact));
        assert_eq!(StaticPage::from_path("/blog/1"), None);
    }

    #[test]
    fn test_page_meta_is_localized() {
        let ko = StaticPage::Home.page_meta(Locale::Ko);
        let en = StaticPage::Home.page_meta(Locale::En);
        assert_eq!(ko.title.as_deref(), Some("홈"));
        assert_eq!(en.title.as_deref(), Some("Home"));
        assert_ne!(ko.description, en.description);
    }

    #[test]
    fn test_every_page_has_text_in_every_locale() {
        for page in StaticPage::ALL {
            for locale in Locale::ALL {
                let meta = page.page_meta(locale);
                assert!(meta.title.is_some_and(|t| !t.is_empty()));
                assert!(meta.description.is_some_and(|d| !d.is_empty()));
            }
        }
    }

    #[test]
    fn test_resume_is_profile() {
        let meta = StaticPage::Resume.page_meta(Locale::En);
        assert_eq!(meta.open_graph.unwrap().kind, Some(ContentType::Profile));
    }
}
