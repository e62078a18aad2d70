use crate::model::KnowledgeEntry;
use crate::normalize::domain_keyword;
use std::collections::HashMap;

/// Built-in table: keyword, display name, category, description, color.
const BUILTIN_SITES: &[(&str, &str, &str, &str, &str)] = &[
    // 搜索引擎
    ("google", "Google", "搜索引擎", "全球最大的搜索引擎，日常查询必备工具", "bg-blue-500"),
    ("bing", "必应", "搜索引擎", "微软旗下搜索引擎，支持AI聊天功能", "bg-blue-500"),
    ("baidu", "百度", "搜索引擎", "中国最大的搜索引擎", "bg-blue-500"),
    ("duckduckgo", "DuckDuckGo", "搜索引擎", "注重隐私的搜索引擎", "bg-blue-500"),
    ("yahoo", "雅虎", "搜索引擎", "老牌门户网站与搜索服务", "bg-purple-500"),
    // 开发工具
    ("github", "GitHub", "开发工具", "代码托管平台，开源项目管理，开发者协作首选", "bg-gray-800"),
    ("gitlab", "GitLab", "开发工具", "代码托管和CI/CD平台", "bg-gray-800"),
    ("stackoverflow", "Stack Overflow", "开发工具", "程序员问答社区，技术问题解决方案库", "bg-gray-800"),
    ("codepen", "CodePen", "开发工具", "前端代码在线编辑与演示平台", "bg-gray-800"),
    ("vercel", "Vercel", "开发工具", "前端部署和托管平台", "bg-gray-800"),
    ("netlify", "Netlify", "开发工具", "静态网站托管和部署平台", "bg-gray-800"),
    ("npmjs", "NPM", "开发工具", "JavaScript包管理仓库", "bg-red-600"),
    ("npm", "NPM", "开发工具", "JavaScript包管理仓库", "bg-red-600"),
    ("yarn", "Yarn", "开发工具", "JavaScript依赖管理工具", "bg-blue-500"),
    // 娱乐媒体
    ("youtube", "YouTube", "娱乐媒体", "视频分享平台，娱乐学习兼备，内容丰富多样", "bg-red-500"),
    ("netflix", "Netflix", "娱乐媒体", "流媒体视频服务，高质量影视内容，需要会员订阅", "bg-red-600"),
    ("spotify", "Spotify", "娱乐媒体", "音乐流媒体平台，海量音乐资源，支持离线播放", "bg-green-500"),
    ("bilibili", "哔哩哔哩", "娱乐媒体", "中文视频平台，学习娱乐社区，弹幕互动", "bg-blue-400"),
    ("twitch", "Twitch", "娱乐媒体", "游戏直播平台", "bg-purple-500"),
    ("hulu", "Hulu", "娱乐媒体", "美国流媒体视频服务", "bg-green-600"),
    ("disney", "Disney+", "娱乐媒体", "迪士尼流媒体平台", "bg-blue-700"),
    // 生产力工具
    ("notion", "Notion", "生产力工具", "多功能笔记工具，项目管理，团队协作利器", "bg-gray-700"),
    ("trello", "Trello", "生产力工具", "看板式项目管理，任务跟踪，简单易用", "bg-blue-500"),
    ("asana", "Asana", "生产力工具", "项目管理和团队协作工具", "bg-orange-500"),
    ("monday", "Monday.com", "生产力工具", "项目管理和工作流程工具", "bg-blue-500"),
    ("evernote", "印象笔记", "生产力工具", "笔记和信息管理工具", "bg-green-600"),
    ("todoist", "Todoist", "生产力工具", "待办事项与任务管理工具", "bg-red-500"),
    ("clickup", "ClickUp", "生产力工具", "一站式项目管理平台", "bg-purple-500"),
    // 设计工具
    ("figma", "Figma", "设计工具", "在线设计工具，UI/UX设计首选，支持团队协作", "bg-purple-500"),
    ("sketch", "Sketch", "设计工具", "矢量UI设计工具", "bg-blue-500"),
    ("adobe", "Adobe", "设计工具", "创意设计软件套件", "bg-red-700"),
    ("canva", "Canva", "设计工具", "在线平面设计工具，简单易用", "bg-blue-500"),
    ("dribbble", "Dribbble", "设计工具", "设计师作品展示社区", "bg-pink-500"),
    ("behance", "Behance", "设计工具", "创意作品展示平台", "bg-blue-600"),
    // 沟通协作
    ("slack", "Slack", "沟通协作", "团队沟通平台，工作协调，提高团队效率", "bg-purple-600"),
    ("discord", "Discord", "沟通协作", "语音聊天平台，游戏社区，实时沟通", "bg-indigo-500"),
    ("teams", "Microsoft Teams", "沟通协作", "微软团队协作平台", "bg-blue-600"),
    ("zoom", "Zoom", "沟通协作", "视频会议工具，远程沟通首选", "bg-blue-500"),
    ("telegram", "Telegram", "沟通协作", "注重隐私的即时通讯工具", "bg-blue-400"),
    ("whatsapp", "WhatsApp", "沟通协作", "全球流行的即时通讯应用", "bg-green-500"),
    ("wechat", "微信", "沟通协作", "社交通讯工具，连接你我他", "bg-green-600"),
    // 社交媒体
    ("twitter", "Twitter", "社交媒体", "社交媒体平台，实时信息，全球动态", "bg-blue-400"),
    ("facebook", "Facebook", "社交媒体", "全球最大社交网络，连接亲友", "bg-blue-600"),
    ("instagram", "Instagram", "社交媒体", "图片分享社交平台，视觉体验", "bg-pink-500"),
    ("linkedin", "LinkedIn", "社交媒体", "职业社交网络，求职招聘平台", "bg-blue-700"),
    ("pinterest", "Pinterest", "社交媒体", "图片收藏和分享平台", "bg-red-600"),
    ("reddit", "Reddit", "社交媒体", "社区论坛，话题讨论，信息聚合", "bg-orange-600"),
    ("weibo", "微博", "社交媒体", "中文社交媒体平台，热点资讯", "bg-red-500"),
    ("zhihu", "知乎", "社交媒体", "知识问答社区，高质量内容平台", "bg-blue-600"),
    ("douban", "豆瓣", "社交媒体", "文艺生活社区，电影书籍评分", "bg-green-600"),
    // 学习教育
    ("coursera", "Coursera", "学习教育", "在线课程平台，提供大学和机构课程", "bg-blue-600"),
    ("udemy", "Udemy", "学习教育", "在线学习平台，技能培训课程", "bg-purple-700"),
    ("edx", "edX", "学习教育", "免费在线课程平台", "bg-red-700"),
    ("khan", "可汗学院", "学习教育", "免费教育资源平台", "bg-green-600"),
    ("duolingo", "多邻国", "学习教育", "语言学习应用", "bg-green-500"),
    ("wikipedia", "维基百科", "学习教育", "免费百科全书，知识查询平台", "bg-gray-600"),
    // 新闻资讯
    ("cnn", "CNN", "新闻资讯", "美国新闻网络", "bg-red-600"),
    ("bbc", "BBC", "新闻资讯", "英国广播公司", "bg-red-700"),
    ("nytimes", "纽约时报", "新闻资讯", "美国主流报纸", "bg-gray-700"),
    ("guardian", "卫报", "新闻资讯", "英国主流报纸", "bg-blue-600"),
    ("reuters", "路透社", "新闻资讯", "国际新闻通讯社", "bg-blue-700"),
    ("medium", "Medium", "新闻资讯", "优质博客与长文阅读平台", "bg-gray-800"),
    // 电商购物
    ("taobao", "淘宝", "电商购物", "综合购物平台，商品种类丰富", "bg-orange-600"),
    ("tmall", "天猫", "电商购物", "品牌购物商城", "bg-red-600"),
    ("jd", "京东", "电商购物", "品质购物平台，正品保障", "bg-red-600"),
    ("amazon", "亚马逊", "电商购物", "全球最大电商平台，购物首选", "bg-orange-500"),
    ("ebay", "eBay", "电商购物", "全球在线拍卖与购物平台", "bg-yellow-500"),
    // 云服务
    ("aws", "AWS", "云服务", "亚马逊云计算服务", "bg-orange-500"),
    ("azure", "Azure", "云服务", "微软云计算平台", "bg-blue-600"),
    ("gcp", "Google Cloud", "云服务", "谷歌云计算平台", "bg-blue-500"),
    ("aliyun", "阿里云", "云服务", "阿里巴巴云计算服务", "bg-orange-500"),
    ("tencent", "腾讯云", "云服务", "腾讯云计算服务", "bg-blue-500"),
    // 金融服务
    ("paypal", "PayPal", "金融服务", "国际在线支付平台", "bg-blue-700"),
    ("stripe", "Stripe", "金融服务", "开发者友好的在线支付服务", "bg-indigo-500"),
    ("alipay", "支付宝", "金融服务", "移动支付平台，生活服务便民", "bg-blue-500"),
    ("wechatpay", "微信支付", "金融服务", "微信旗下移动支付服务", "bg-green-600"),
];

const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("搜索引擎", "bg-blue-500"),
    ("开发工具", "bg-gray-800"),
    ("娱乐媒体", "bg-red-500"),
    ("生产力工具", "bg-green-500"),
    ("设计工具", "bg-purple-500"),
    ("沟通协作", "bg-indigo-500"),
    ("社交媒体", "bg-pink-500"),
    ("学习教育", "bg-teal-500"),
    ("新闻资讯", "bg-orange-500"),
    ("电商购物", "bg-yellow-500"),
    ("云服务", "bg-cyan-500"),
    ("金融服务", "bg-green-600"),
    ("其他", "bg-gray-500"),
];

const PALETTE: &[&str] = &[
    "bg-blue-500",
    "bg-purple-500",
    "bg-green-500",
    "bg-red-500",
    "bg-yellow-500",
    "bg-indigo-500",
    "bg-pink-500",
    "bg-teal-500",
    "bg-orange-500",
    "bg-cyan-500",
];

/// Read-only lookup from domain keyword to what is known about the site.
///
/// Built once and handed to the parsers; tests can swap in their own table.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: HashMap<String, KnowledgeEntry>,
}

impl KnowledgeBase {
    /// The table shipped with the crate
    pub fn builtin() -> Self {
        let entries = BUILTIN_SITES
            .iter()
            .map(|(keyword, name, category, description, color)| {
                (
                    keyword.to_string(),
                    KnowledgeEntry {
                        name: name.to_string(),
                        category: category.to_string(),
                        description: description.to_string(),
                        color: color.to_string(),
                    },
                )
            })
            .collect();

        KnowledgeBase { entries }
    }

    /// Adds or replaces an entry
    pub fn insert(&mut self, keyword: &str, entry: KnowledgeEntry) {
        self.entries.insert(keyword.to_lowercase(), entry);
    }

    pub fn with_entry(mut self, keyword: &str, entry: KnowledgeEntry) -> Self {
        self.insert(keyword, entry);
        self
    }

    /// Case-insensitive exact match on the keyword
    pub fn lookup(&self, keyword: &str) -> Option<&KnowledgeEntry> {
        if keyword.bytes().any(|b| b.is_ascii_uppercase()) || !keyword.is_ascii() {
            self.entries.get(&keyword.to_lowercase())
        } else {
            self.entries.get(keyword)
        }
    }

    /// Looks up the entry for the domain keyword of `url`
    pub fn lookup_url(&self, url: &str) -> Option<&KnowledgeEntry> {
        domain_keyword(url).and_then(|keyword| self.lookup(&keyword))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Card color for a category; unknown categories get a stable palette pick.
pub fn color_for_category(category: &str) -> &'static str {
    let category = category.trim();
    if let Some((_, color)) = CATEGORY_COLORS.iter().find(|(name, _)| *name == category) {
        return color;
    }

    let hash = category
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    PALETTE[hash % PALETTE.len()]
}
