//! Action strings gated by the authorization layer.
//!
//! Policies name these in their `actions` lists; each administrative
//! operation evaluates exactly one of them against the target URN.

pub const USER_ACTION_CREATE_USER: &str = "iam:createUser";
pub const USER_ACTION_GET_USER: &str = "iam:getUser";
pub const USER_ACTION_LIST_USERS: &str = "iam:listUsers";
pub const USER_ACTION_UPDATE_USER: &str = "iam:updateUser";
pub const USER_ACTION_DELETE_USER: &str = "iam:deleteUser";
pub const USER_ACTION_LIST_GROUPS_FOR_USER: &str = "iam:listUserGroups";

pub const GROUP_ACTION_CREATE_GROUP: &str = "iam:createGroup";
pub const GROUP_ACTION_GET_GROUP: &str = "iam:getGroup";
pub const GROUP_ACTION_LIST_GROUPS: &str = "iam:listGroups";
pub const GROUP_ACTION_UPDATE_GROUP: &str = "iam:updateGroup";
pub const GROUP_ACTION_DELETE_GROUP: &str = "iam:deleteGroup";
pub const GROUP_ACTION_ADD_MEMBER: &str = "iam:addMember";
pub const GROUP_ACTION_REMOVE_MEMBER: &str = "iam:removeMember";
pub const GROUP_ACTION_LIST_MEMBERS: &str = "iam:listMembers";
pub const GROUP_ACTION_ATTACH_POLICY: &str = "iam:attachGroupPolicy";
pub const GROUP_ACTION_DETACH_POLICY: &str = "iam:detachGroupPolicy";
pub const GROUP_ACTION_LIST_ATTACHED_POLICIES: &str = "iam:listAttachedGroupPolicies";

pub const POLICY_ACTION_CREATE_POLICY: &str = "iam:createPolicy";
pub const POLICY_ACTION_GET_POLICY: &str = "iam:getPolicy";
pub const POLICY_ACTION_LIST_POLICIES: &str = "iam:listPolicies";
pub const POLICY_ACTION_UPDATE_POLICY: &str = "iam:updatePolicy";
pub const POLICY_ACTION_DELETE_POLICY: &str = "iam:deletePolicy";
pub const POLICY_ACTION_LIST_ATTACHED_GROUPS: &str = "iam:listAttachedGroups";

pub const PROXY_ACTION_CREATE_RESOURCE: &str = "iam:createProxyResource";
pub const PROXY_ACTION_GET_RESOURCE: &str = "iam:getProxyResource";
pub const PROXY_ACTION_LIST_RESOURCES: &str = "iam:listProxyResources";
pub const PROXY_ACTION_UPDATE_RESOURCE: &str = "iam:updateProxyResource";
pub const PROXY_ACTION_DELETE_RESOURCE: &str = "iam:deleteProxyResource";
