use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct TasksOptions {
    /**Folder to start walking from. Defaults to the root folder `\` */
    pub folder: Option<String>,
    /**Include tasks registered as hidden */
    #[serde(default)]
    pub include_hidden: bool,
    /**How many folder levels below `folder` to walk. Unbounded if not set */
    pub max_depth: Option<usize>,
    /**Remote Task Scheduler to connect to. Local system if not set */
    pub server: Option<String>,
    pub user: Option<String>,
    pub domain: Option<String>,
    pub password: Option<String>,
}
